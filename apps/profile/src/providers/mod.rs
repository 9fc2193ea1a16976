//! Provider adapters — the boundary to external stat sources.
//!
//! Adapters are infallible by signature: every transport, decode, or
//! missing-user fault is caught inside the adapter and converted to `None`.
//! Nothing past this boundary sees a raw provider error.

pub mod competitive;
pub mod hosting;

use async_trait::async_trait;

use crate::models::{CompetitiveStats, HostingStats, Project};

/// Payload from a successful hosting fetch: aggregate stats plus the top
/// starred repositories rendered as showcase projects.
#[derive(Debug, Clone, PartialEq)]
pub struct HostingData {
    pub stats: HostingStats,
    pub projects: Vec<Project>,
}

#[async_trait]
pub trait HostingProvider: Send + Sync {
    async fn fetch_hosting_data(&self, username: &str) -> Option<HostingData>;
}

#[async_trait]
pub trait CompetitiveProvider: Send + Sync {
    async fn fetch_competitive_data(&self, username: &str) -> Option<CompetitiveStats>;
}

/// Per-provider result of one sync cycle. Makes the merge decision typed:
/// only `Success` may overwrite that provider's fields in the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    /// Provider did not participate in this cycle; no network call was made.
    Skipped,
    /// Provider participated but returned no data.
    Failed,
    Success(T),
}

impl<T> ProviderOutcome<T> {
    pub fn from_fetch(fetched: Option<T>) -> Self {
        match fetched {
            Some(payload) => ProviderOutcome::Success(payload),
            None => ProviderOutcome::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success(_))
    }
}
