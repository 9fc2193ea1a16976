//! Sync Orchestrator — refreshes provider-backed fields of the aggregate.
//!
//! One cycle queries both providers concurrently and merges per provider:
//! only a `Success` outcome overwrites that provider's fields, so a disabled
//! or failing provider never clobbers data already held. A cycle that has
//! been superseded by a newer call discards its results entirely instead of
//! racing the newer cycle on the merge (see `begin_sync_generation`).

use chrono::Utc;
use tracing::{debug, info};

use crate::models::ProfileAggregate;
use crate::providers::{CompetitiveProvider, HostingProvider, ProviderOutcome};
use crate::store::ProfileStore;

impl ProfileStore {
    /// Runs one sync cycle. Best-effort: there is no return value; callers
    /// observe the cycle through the `is_syncing` transition and the
    /// (possibly unchanged) aggregate.
    ///
    /// Adapters are infallible by signature, so the joint await cannot fail;
    /// a provider that returns no data simply leaves its fields untouched.
    pub async fn fetch_and_set_stats(
        &self,
        hosting: &dyn HostingProvider,
        competitive: &dyn CompetitiveProvider,
    ) {
        let generation = self.begin_sync_generation();
        self.mutate(|profile| profile.is_syncing = true);

        // Participation comes from the aggregate read at call time, never
        // from caller arguments: a repeated call must see the configuration
        // as it stands now.
        let profile = self.snapshot();
        let hosting_identity = hosting_identity(&profile);
        let competitive_identity = competitive_identity(&profile);

        debug!(
            "sync cycle {generation}: hosting={:?} competitive={:?}",
            hosting_identity, competitive_identity
        );

        let hosting_fut = async {
            match &hosting_identity {
                Some(username) => {
                    ProviderOutcome::from_fetch(hosting.fetch_hosting_data(username).await)
                }
                None => ProviderOutcome::Skipped,
            }
        };
        let competitive_fut = async {
            match &competitive_identity {
                Some(username) => {
                    ProviderOutcome::from_fetch(competitive.fetch_competitive_data(username).await)
                }
                None => ProviderOutcome::Skipped,
            }
        };

        let (hosting_outcome, competitive_outcome) = tokio::join!(hosting_fut, competitive_fut);

        if !self.is_current_sync_generation(generation) {
            // A newer cycle owns the aggregate now, including `is_syncing`.
            debug!("sync cycle {generation} superseded, discarding results");
            return;
        }

        let any_success = hosting_outcome.is_success() || competitive_outcome.is_success();
        self.mutate(move |profile| {
            if let ProviderOutcome::Success(data) = hosting_outcome {
                profile.hosting_stats = data.stats;
                // Showcase projects are derived wholly from the latest fetch.
                profile.projects = data.projects;
            }
            if let ProviderOutcome::Success(stats) = competitive_outcome {
                profile.competitive_stats = stats;
            }
            if any_success {
                profile.last_synced_at = Some(Utc::now());
            }
            profile.is_syncing = false;
        });

        info!("sync cycle {generation} complete (updated: {any_success})");
    }
}

/// Hosting participates when visible and a username can be read off the
/// hosting social link.
fn hosting_identity(profile: &ProfileAggregate) -> Option<String> {
    if !profile.integrations.hosting.visible {
        return None;
    }
    username_from_url(&profile.social_links.hosting)
}

/// Competitive participates when visible with a nonempty username.
fn competitive_identity(profile: &ProfileAggregate) -> Option<String> {
    let integration = &profile.integrations.competitive;
    if integration.visible && !integration.username.trim().is_empty() {
        Some(integration.username.trim().to_string())
    } else {
        None
    }
}

/// Extracts the trailing path segment of a profile URL as the username,
/// ignoring any query or fragment. A bare domain or an empty link yields
/// nothing.
fn username_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().split(['?', '#']).next().unwrap_or("");
    let trimmed = trimmed.trim_end_matches('/');
    if !trimmed.contains('/') {
        return None;
    }
    let segment = trimmed.rsplit('/').next().unwrap_or("");
    if segment.is_empty() || segment.contains(['.', ':', '@']) {
        return None;
    }
    Some(segment.to_string())
}
