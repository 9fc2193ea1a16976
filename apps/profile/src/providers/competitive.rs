//! Competitive-programming adapter backed by a LeetCode-shaped GraphQL API.
//!
//! One POST fetches per-difficulty solved counts, the site-wide question
//! totals, and the user's global ranking. The API reports ranking as a signed
//! integer; it is clamped to zero here so the aggregate never stores a
//! negative value.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::models::CompetitiveStats;
use crate::providers::CompetitiveProvider;

const DEFAULT_ENDPOINT: &str = "https://leetcode.com/graphql";

const PROFILE_QUERY: &str = r#"
query userProfile($username: String!) {
  allQuestionsCount { difficulty count }
  matchedUser(username: $username) {
    profile { ranking }
    submitStatsGlobal {
      acSubmissionNum { difficulty count }
    }
  }
}
"#;

#[derive(Debug, Error)]
enum CompetitiveError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unknown user: {0}")]
    UnknownUser(String),
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: ProfileData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileData {
    all_questions_count: Vec<DifficultyCount>,
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
struct DifficultyCount {
    difficulty: String,
    count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    profile: UserProfile,
    submit_stats_global: SubmitStats,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    ranking: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    ac_submission_num: Vec<DifficultyCount>,
}

pub struct LeetCodeCompetitiveProvider {
    client: Client,
    endpoint: String,
}

impl LeetCodeCompetitiveProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: endpoint.into(),
        }
    }

    async fn fetch(&self, username: &str) -> Result<CompetitiveStats, CompetitiveError> {
        let body = json!({
            "query": PROFILE_QUERY,
            "variables": { "username": username },
        });

        let response: GraphqlResponse = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let user = response
            .data
            .matched_user
            .ok_or_else(|| CompetitiveError::UnknownUser(username.to_string()))?;

        Ok(stats_from_profile(&response.data.all_questions_count, &user))
    }
}

impl Default for LeetCodeCompetitiveProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl CompetitiveProvider for LeetCodeCompetitiveProvider {
    async fn fetch_competitive_data(&self, username: &str) -> Option<CompetitiveStats> {
        match self.fetch(username).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("competitive fetch for '{username}' failed: {e}");
                None
            }
        }
    }
}

fn count_for(counts: &[DifficultyCount], difficulty: &str) -> u32 {
    counts
        .iter()
        .find(|c| c.difficulty == difficulty)
        .map(|c| c.count)
        .unwrap_or(0)
}

fn stats_from_profile(totals: &[DifficultyCount], user: &MatchedUser) -> CompetitiveStats {
    let solved = &user.submit_stats_global.ac_submission_num;
    CompetitiveStats {
        solved: count_for(solved, "All"),
        easy_solved: count_for(solved, "Easy"),
        medium_solved: count_for(solved, "Medium"),
        hard_solved: count_for(solved, "Hard"),
        ranking: user.profile.ranking.max(0) as u32,
        total_easy: count_for(totals, "Easy"),
        total_medium: count_for(totals, "Medium"),
        total_hard: count_for(totals, "Hard"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(all: u32, easy: u32, medium: u32, hard: u32) -> Vec<DifficultyCount> {
        [("All", all), ("Easy", easy), ("Medium", medium), ("Hard", hard)]
            .into_iter()
            .map(|(difficulty, count)| DifficultyCount {
                difficulty: difficulty.to_string(),
                count,
            })
            .collect()
    }

    fn user(ranking: i64, solved: Vec<DifficultyCount>) -> MatchedUser {
        MatchedUser {
            profile: UserProfile { ranking },
            submit_stats_global: SubmitStats {
                ac_submission_num: solved,
            },
        }
    }

    #[test]
    fn test_maps_per_difficulty_counts() {
        let stats = stats_from_profile(
            &counts(3512, 800, 1800, 912),
            &user(54_321, counts(150, 80, 55, 15)),
        );

        assert_eq!(stats.solved, 150);
        assert_eq!(stats.easy_solved, 80);
        assert_eq!(stats.medium_solved, 55);
        assert_eq!(stats.hard_solved, 15);
        assert_eq!(stats.ranking, 54_321);
        assert_eq!(stats.total_easy, 800);
        assert_eq!(stats.total_medium, 1800);
        assert_eq!(stats.total_hard, 912);
    }

    #[test]
    fn test_ranking_is_clamped_to_zero() {
        let stats = stats_from_profile(&counts(0, 0, 0, 0), &user(-5, counts(0, 0, 0, 0)));
        assert_eq!(stats.ranking, 0);
    }

    #[test]
    fn test_missing_difficulty_bucket_reads_as_zero() {
        let stats = stats_from_profile(&[], &user(1, vec![]));
        assert_eq!(stats.solved, 0);
        assert_eq!(stats.total_hard, 0);
    }

    #[test]
    fn test_response_with_null_matched_user_deserializes() {
        let json = r#"{
            "data": {
                "allQuestionsCount": [{"difficulty": "All", "count": 3512}],
                "matchedUser": null
            }
        }"#;
        let response: GraphqlResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.matched_user.is_none());
    }
}
