//! Resume Pipeline — derives a structured resume document from the aggregate.
//!
//! The pipeline snapshots the store at call time, hands the snapshot to a
//! `ResumeGenerator`, and on success replaces `generated_resume` wholesale.
//! On failure the error propagates to the caller and the stored resume is
//! left exactly as it was. No retry at this layer.

pub mod prompts;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::llm::{LlmClient, LlmError};
use crate::models::{GeneratedResume, Project, Skill, TimelineEvent};
use crate::store::ProfileStore;
use prompts::{RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("generation failed: {0}")]
    Failed(String),
}

/// The slice of the aggregate the generator sees.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSnapshot {
    pub professional_title: String,
    pub bio: String,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub timeline_events: Vec<TimelineEvent>,
}

#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(&self, snapshot: &ResumeSnapshot)
        -> Result<GeneratedResume, GeneratorError>;
}

impl ProfileStore {
    /// Generates a resume from the current aggregate and stores it.
    /// The stored document is replaced atomically or not at all.
    pub async fn generate_and_set_resume(
        &self,
        generator: &dyn ResumeGenerator,
    ) -> Result<GeneratedResume, GeneratorError> {
        let profile = self.snapshot();
        let snapshot = ResumeSnapshot {
            professional_title: profile.professional_title,
            bio: profile.bio,
            skills: profile.skills,
            projects: profile.projects,
            timeline_events: profile.timeline_events,
        };

        let resume = generator.generate(&snapshot).await?;
        info!(
            "resume generated: {} experience entries, {} projects",
            resume.experience.len(),
            resume.projects.len()
        );

        let stored = resume.clone();
        self.mutate(move |profile| profile.generated_resume = Some(stored));
        Ok(resume)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed generator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmResumeGenerator {
    llm: LlmClient,
}

impl LlmResumeGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeGenerator for LlmResumeGenerator {
    async fn generate(
        &self,
        snapshot: &ResumeSnapshot,
    ) -> Result<GeneratedResume, GeneratorError> {
        let profile_json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| GeneratorError::Failed(format!("snapshot serialization: {e}")))?;
        let prompt = RESUME_PROMPT_TEMPLATE.replace("{profile_json}", &profile_json);

        let resume: GeneratedResume = self.llm.call_json(&prompt, RESUME_SYSTEM).await?;
        Ok(resume)
    }
}
