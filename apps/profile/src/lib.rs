//! Developer profile aggregation.
//!
//! Pulls reputation signals from a code-hosting platform and a
//! competitive-programming platform into one persisted profile aggregate,
//! and derives a structured resume document from it via an LLM backend.
//!
//! The [`store::ProfileStore`] is the single mutation surface; providers and
//! the resume generator plug in behind traits so callers can swap backends.

pub mod config;
pub mod llm;
pub mod models;
pub mod providers;
pub mod resume;
pub mod store;
pub mod sync;

pub use models::ProfileAggregate;
pub use providers::{CompetitiveProvider, HostingProvider, ProviderOutcome};
pub use resume::{GeneratorError, ResumeGenerator, ResumeSnapshot};
pub use store::{IntegrationsPatch, ProfileDetailsPatch, ProfileStore};
