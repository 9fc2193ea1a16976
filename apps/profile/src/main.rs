//! Demo binary: load the persisted profile, run one sync cycle against the
//! live providers, and (with an API key configured) regenerate the resume.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use profile::config::Config;
use profile::llm::LlmClient;
use profile::providers::competitive::LeetCodeCompetitiveProvider;
use profile::providers::hosting::GithubHostingProvider;
use profile::resume::LlmResumeGenerator;
use profile::store::storage::{FileStorage, ProfileStorage};
use profile::store::ProfileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting profile sync v{}", env!("CARGO_PKG_VERSION"));

    let storage: Arc<dyn ProfileStorage> = Arc::new(FileStorage::new(&config.store_path));
    let store = ProfileStore::load(storage).await;

    let snapshot = store.snapshot();
    info!(
        "Loaded profile '{}' ({} projects, last synced: {:?})",
        snapshot.professional_title,
        snapshot.projects.len(),
        snapshot.last_synced_at
    );

    let hosting = GithubHostingProvider::new(config.hosting_api_base.clone());
    let competitive = LeetCodeCompetitiveProvider::new(config.competitive_endpoint.clone());

    store.fetch_and_set_stats(&hosting, &competitive).await;

    let synced = store.snapshot();
    info!(
        "Sync complete: {} stars, {} followers, {} solved problems",
        synced.hosting_stats.stars, synced.hosting_stats.followers, synced.competitive_stats.solved
    );

    let generator = LlmResumeGenerator::new(LlmClient::new(config.anthropic_api_key.clone()));
    match store.generate_and_set_resume(&generator).await {
        Ok(resume) => info!("Resume generated: {}", resume.summary),
        Err(e) => tracing::error!("Resume generation failed: {e}"),
    }

    store.flush().await?;
    Ok(())
}
