//! Code-hosting adapter backed by a GitHub-shaped REST API.
//!
//! Two calls per fetch: the user record (followers) and the repository list
//! (stars, repo count, showcase projects). The showcase keeps the five
//! highest-starred repositories.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::models::{HostingStats, Project};
use crate::providers::{HostingData, HostingProvider};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("profile-sync/", env!("CARGO_PKG_VERSION"));
const SHOWCASE_PROJECT_LIMIT: usize = 5;

#[derive(Debug, Error)]
enum HostingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    followers: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct RepoResponse {
    id: u64,
    name: String,
    full_name: String,
    description: Option<String>,
    stargazers_count: u32,
    language: Option<String>,
    html_url: String,
    homepage: Option<String>,
}

pub struct GithubHostingProvider {
    client: Client,
    api_base: String,
}

impl GithubHostingProvider {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_base: api_base.into(),
        }
    }

    async fn fetch(&self, username: &str) -> Result<HostingData, HostingError> {
        let user: UserResponse = self
            .client
            .get(format!("{}/users/{username}", self.api_base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let repos: Vec<RepoResponse> = self
            .client
            .get(format!(
                "{}/users/{username}/repos?per_page=100&type=owner",
                self.api_base
            ))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(summarize(user, repos))
    }
}

impl Default for GithubHostingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl HostingProvider for GithubHostingProvider {
    async fn fetch_hosting_data(&self, username: &str) -> Option<HostingData> {
        match self.fetch(username).await {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("hosting fetch for '{username}' failed: {e}");
                None
            }
        }
    }
}

/// Folds the raw API responses into the normalized payload.
fn summarize(user: UserResponse, repos: Vec<RepoResponse>) -> HostingData {
    let stats = HostingStats {
        stars: repos.iter().map(|r| r.stargazers_count).sum(),
        followers: user.followers,
        repos: repos.len() as u32,
    };

    let mut ranked = repos;
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));

    let projects = ranked
        .into_iter()
        .take(SHOWCASE_PROJECT_LIMIT)
        .map(project_from_repo)
        .collect();

    HostingData { stats, projects }
}

fn project_from_repo(repo: RepoResponse) -> Project {
    Project {
        id: repo.id.to_string(),
        title: repo.name,
        description: repo.description.unwrap_or_default(),
        tech_stack: repo.language.into_iter().collect(),
        // Social-preview card; best effort, the frontend falls back if it 404s.
        image_url: format!("https://opengraph.githubassets.com/1/{}", repo.full_name),
        repo_url: Some(repo.html_url),
        live_url: repo.homepage.filter(|url| !url.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: u64, name: &str, stars: u32, language: Option<&str>) -> RepoResponse {
        RepoResponse {
            id,
            name: name.to_string(),
            full_name: format!("alice/{name}"),
            description: Some(format!("{name} description")),
            stargazers_count: stars,
            language: language.map(str::to_string),
            html_url: format!("https://github.example/alice/{name}"),
            homepage: None,
        }
    }

    #[test]
    fn test_summarize_totals_stars_and_counts_repos() {
        let data = summarize(
            UserResponse { followers: 9 },
            vec![repo(1, "a", 3, None), repo(2, "b", 7, Some("Rust"))],
        );

        assert_eq!(
            data.stats,
            HostingStats {
                stars: 10,
                followers: 9,
                repos: 2
            }
        );
    }

    #[test]
    fn test_summarize_keeps_top_five_repos_by_stars() {
        let repos = (0..8)
            .map(|i| repo(i, &format!("repo{i}"), i as u32 * 10, Some("Rust")))
            .collect();
        let data = summarize(UserResponse { followers: 0 }, repos);

        assert_eq!(data.projects.len(), 5);
        assert_eq!(data.projects[0].title, "repo7");
        assert_eq!(data.projects[4].title, "repo3");
    }

    #[test]
    fn test_project_tech_stack_is_single_language_or_empty() {
        let with_language = project_from_repo(repo(1, "typed", 1, Some("Rust")));
        assert_eq!(with_language.tech_stack, vec!["Rust".to_string()]);

        let without = project_from_repo(repo(2, "untyped", 1, None));
        assert!(without.tech_stack.is_empty());
    }

    #[test]
    fn test_project_live_url_drops_empty_homepage() {
        let mut raw = repo(1, "site", 1, None);
        raw.homepage = Some(String::new());
        assert!(project_from_repo(raw).live_url.is_none());

        let mut raw = repo(2, "site2", 1, None);
        raw.homepage = Some("https://site2.example".to_string());
        assert_eq!(
            project_from_repo(raw).live_url.as_deref(),
            Some("https://site2.example")
        );
    }
}
