use std::path::PathBuf;

use anyhow::Result;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Path of the single persisted profile record.
    pub store_path: PathBuf,
    pub hosting_api_base: String,
    pub competitive_endpoint: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            store_path: std::env::var("PROFILE_STORE_PATH")
                .unwrap_or_else(|_| "profile.json".to_string())
                .into(),
            hosting_api_base: std::env::var("HOSTING_API_BASE")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            competitive_endpoint: std::env::var("COMPETITIVE_GRAPHQL_URL")
                .unwrap_or_else(|_| "https://leetcode.com/graphql".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| anyhow::anyhow!("Required environment variable '{key}' is not set"))
}
