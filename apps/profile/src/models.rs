//! Profile data model — the persisted aggregate and everything it owns.
//!
//! Field names serialize as camelCase so the on-disk record matches the shape
//! the frontend reads. Every field carries `serde(default)` so a record
//! written by an older build still loads after new fields are added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-provider integration configuration.
///
/// The competitive provider is identified by an explicit username; the hosting
/// provider's identity is derived from `SocialLinks::hosting` at sync time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Integrations {
    pub hosting: HostingIntegration,
    pub competitive: CompetitiveIntegration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HostingIntegration {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitiveIntegration {
    pub visible: bool,
    pub username: String,
}

/// Aggregate stats from the code-hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HostingStats {
    pub stars: u32,
    pub followers: u32,
    pub repos: u32,
}

/// Solved-problem counters from the competitive-programming provider.
/// `ranking` is clamped to zero at the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitiveStats {
    pub solved: u32,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
    pub ranking: u32,
    pub total_easy: u32,
    pub total_medium: u32,
    pub total_hard: u32,
}

/// A showcased repository, truncated to what the profile page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub image_url: String,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineEvent {
    pub id: String,
    pub date: String,
    pub title: String,
    pub description: String,
    pub icon_kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    /// Self-assessed proficiency, 0–100.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinks {
    pub hosting: String,
    pub linkedin: String,
    pub twitter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Generated resume
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeExperience {
    pub title: String,
    pub date: String,
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeProject {
    pub title: String,
    pub tech_stack: Vec<String>,
    pub bullet_points: Vec<String>,
}

/// Structured resume document produced by the generator.
/// Absent until the first successful generation; later generations replace it
/// wholesale, never field-by-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedResume {
    pub summary: String,
    pub experience: Vec<ResumeExperience>,
    pub projects: Vec<ResumeProject>,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The complete in-memory profile record. Single source of truth: the store
/// owns one of these and every reader observes it through a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileAggregate {
    pub professional_title: String,
    pub bio: String,
    pub social_links: SocialLinks,
    pub integrations: Integrations,
    pub hosting_stats: HostingStats,
    pub competitive_stats: CompetitiveStats,
    pub projects: Vec<Project>,
    pub timeline_events: Vec<TimelineEvent>,
    pub skills: Vec<Skill>,
    pub is_syncing: bool,
    pub generated_resume: Option<GeneratedResume>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl ProfileAggregate {
    /// The default aggregate used at first load, or when the persisted record
    /// is missing or unreadable. Ships seed skills and a timeline event so the
    /// resume pipeline has input before the first provider sync.
    pub fn seeded() -> Self {
        ProfileAggregate {
            professional_title: "Software Engineer".to_string(),
            bio: String::new(),
            social_links: SocialLinks::default(),
            integrations: Integrations {
                hosting: HostingIntegration { visible: true },
                competitive: CompetitiveIntegration {
                    visible: true,
                    username: String::new(),
                },
            },
            hosting_stats: HostingStats::default(),
            competitive_stats: CompetitiveStats::default(),
            projects: Vec::new(),
            timeline_events: vec![TimelineEvent {
                id: "seed-joined".to_string(),
                date: "2024".to_string(),
                title: "Joined the platform".to_string(),
                description: "Created a developer profile.".to_string(),
                icon_kind: "star".to_string(),
            }],
            skills: vec![
                Skill {
                    name: "Problem Solving".to_string(),
                    level: 70,
                },
                Skill {
                    name: "Communication".to_string(),
                    level: 70,
                },
            ],
            is_syncing: false,
            generated_resume: None,
            last_synced_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_serializes_as_camel_case() {
        let aggregate = ProfileAggregate::seeded();
        let json = serde_json::to_value(&aggregate).unwrap();

        assert!(json.get("professionalTitle").is_some());
        assert!(json.get("socialLinks").is_some());
        assert!(json.get("hostingStats").is_some());
        assert!(json.get("isSyncing").is_some());
        assert!(json.get("generatedResume").is_some());
        assert!(json.get("professional_title").is_none());
    }

    #[test]
    fn test_aggregate_loads_from_partial_record() {
        // A record written before generatedResume/lastSyncedAt existed.
        let json = serde_json::json!({
            "professionalTitle": "Backend Engineer",
            "bio": "I build things.",
            "hostingStats": { "stars": 42, "followers": 7, "repos": 12 }
        });

        let aggregate: ProfileAggregate = serde_json::from_value(json).unwrap();
        assert_eq!(aggregate.professional_title, "Backend Engineer");
        assert_eq!(aggregate.hosting_stats.stars, 42);
        assert!(aggregate.generated_resume.is_none());
        assert!(!aggregate.is_syncing);
        assert!(aggregate.projects.is_empty());
    }

    #[test]
    fn test_seeded_aggregate_is_not_syncing_and_has_no_resume() {
        let aggregate = ProfileAggregate::seeded();
        assert!(!aggregate.is_syncing);
        assert!(aggregate.generated_resume.is_none());
        assert!(aggregate.integrations.hosting.visible);
        assert!(aggregate.integrations.competitive.username.is_empty());
        assert!(!aggregate.skills.is_empty());
    }

    #[test]
    fn test_generated_resume_round_trips() {
        let resume = GeneratedResume {
            summary: "Seasoned systems engineer.".to_string(),
            experience: vec![ResumeExperience {
                title: "Open Source Contributor".to_string(),
                date: "2022 - Present".to_string(),
                bullet_points: vec!["Maintained a parser crate".to_string()],
            }],
            projects: vec![ResumeProject {
                title: "fastcache".to_string(),
                tech_stack: vec!["Rust".to_string()],
                bullet_points: vec!["Reduced p99 latency by 40%".to_string()],
            }],
        };

        let json = serde_json::to_string(&resume).unwrap();
        let recovered: GeneratedResume = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, resume);
    }
}
