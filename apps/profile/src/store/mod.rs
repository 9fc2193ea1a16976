//! Persisted Profile Store — the single owner of the profile aggregate.
//!
//! The aggregate lives inside a `tokio::sync::watch` channel: mutations go
//! through the store's methods (the only writer), and readers either take a
//! point-in-time `snapshot()` or `subscribe()` for change notifications. No
//! ambient globals.
//!
//! Every mutation is written through to storage by one persister task that
//! follows the subscription: it always saves the latest aggregate, so writes
//! cannot reorder and the durable record converges to the in-memory state.
//! A failed write is logged and dropped because the in-memory aggregate is
//! authoritative.

pub mod storage;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::{
    CompetitiveIntegration, HostingIntegration, ProfileAggregate, SocialLinks,
};
use storage::ProfileStorage;

/// Partial update for the user-editable identity fields.
/// Omitted fields leave the aggregate untouched; no URL validation is done.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDetailsPatch {
    pub professional_title: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<SocialLinks>,
}

/// Partial update for integration configuration. Merge is at the provider-key
/// level: a supplied sub-record replaces that provider's config wholesale and
/// leaves the other provider untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationsPatch {
    pub hosting: Option<HostingIntegration>,
    pub competitive: Option<CompetitiveIntegration>,
}

pub struct ProfileStore {
    state: watch::Sender<ProfileAggregate>,
    storage: Arc<dyn ProfileStorage>,
    /// Serializes storage writes between the persister task and `flush`.
    save_lock: Arc<tokio::sync::Mutex<()>>,
    sync_generation: AtomicU64,
}

impl ProfileStore {
    /// Reads the persisted record once and builds the store around it.
    /// A missing or unreadable record falls back to the seeded default.
    /// `is_syncing` is always cleared at load: no cycle survives a restart.
    pub async fn load(storage: Arc<dyn ProfileStorage>) -> Self {
        let aggregate = match storage.load().await {
            Ok(Some(mut aggregate)) => {
                aggregate.is_syncing = false;
                aggregate
            }
            Ok(None) => {
                info!("no persisted profile found, seeding defaults");
                ProfileAggregate::seeded()
            }
            Err(e) => {
                warn!("persisted profile unreadable ({e}), seeding defaults");
                ProfileAggregate::seeded()
            }
        };

        let (state, updates) = watch::channel(aggregate);
        let save_lock = Arc::new(tokio::sync::Mutex::new(()));
        spawn_persister(Arc::clone(&storage), Arc::clone(&save_lock), updates);

        ProfileStore {
            state,
            storage,
            save_lock,
            sync_generation: AtomicU64::new(0),
        }
    }

    /// Point-in-time copy of the aggregate.
    pub fn snapshot(&self) -> ProfileAggregate {
        self.state.borrow().clone()
    }

    /// Change-notification handle. The receiver sees every committed mutation.
    pub fn subscribe(&self) -> watch::Receiver<ProfileAggregate> {
        self.state.subscribe()
    }

    /// Shallow-merges title, bio and social links into the aggregate.
    pub fn set_profile_details(&self, patch: ProfileDetailsPatch) {
        self.mutate(|profile| {
            if let Some(title) = patch.professional_title {
                profile.professional_title = title;
            }
            if let Some(bio) = patch.bio {
                profile.bio = bio;
            }
            if let Some(links) = patch.social_links {
                profile.social_links = links;
            }
        });
    }

    /// Replaces each supplied provider sub-record wholesale.
    pub fn set_integrations(&self, patch: IntegrationsPatch) {
        self.mutate(|profile| {
            if let Some(hosting) = patch.hosting {
                profile.integrations.hosting = hosting;
            }
            if let Some(competitive) = patch.competitive {
                profile.integrations.competitive = competitive;
            }
        });
    }

    /// Applies `apply` to the aggregate and notifies subscribers, which
    /// includes the persister task. The only mutation path in the crate.
    pub(crate) fn mutate(&self, apply: impl FnOnce(&mut ProfileAggregate)) {
        self.state.send_modify(apply);
    }

    /// Synchronously persists the current aggregate. Write-through is
    /// otherwise asynchronous; callers that are about to exit use this to
    /// make sure the last mutation reached storage.
    pub async fn flush(&self) -> Result<(), storage::StorageError> {
        let _guard = self.save_lock.lock().await;
        let aggregate = self.snapshot();
        self.storage.save(&aggregate).await
    }

    /// Starts a new sync cycle and returns its generation. A cycle whose
    /// generation is no longer current has been superseded and must discard
    /// its results.
    pub(crate) fn begin_sync_generation(&self) -> u64 {
        self.sync_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current_sync_generation(&self, generation: u64) -> bool {
        self.sync_generation.load(Ordering::SeqCst) == generation
    }
}

/// Single writer to storage. Saves the latest aggregate after each change
/// notification; intermediate states that were already superseded by the time
/// a save starts are coalesced away, so the last write always carries the
/// newest state. Exits when the store is dropped.
fn spawn_persister(
    storage: Arc<dyn ProfileStorage>,
    save_lock: Arc<tokio::sync::Mutex<()>>,
    mut updates: watch::Receiver<ProfileAggregate>,
) {
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let aggregate = updates.borrow_and_update().clone();
            let _guard = save_lock.lock().await;
            if let Err(e) = storage.save(&aggregate).await {
                warn!("profile write-through failed: {e}");
            }
        }
    });
}
