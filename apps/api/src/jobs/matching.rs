//! Job-match scoring behind a pluggable trait, so the endpoint and handler
//! stay fixed while the backend can change. Default backend is the LLM.
//!
//! Carried in `AppState` as `Arc<dyn MatchScorer>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::prompts::{MATCH_PROMPT, MATCH_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::job::JobRow;
use crate::resumes::parser::{summarize_experience, summarize_skills, ParsedResume};

/// Scoring result persisted onto the job row and returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// 0 to 100.
    pub score: i32,
    pub reasoning: String,
}

/// Raw model output. The score arrives as an unconstrained JSON number and is
/// normalized before use.
#[derive(Debug, Deserialize)]
struct RawMatchReport {
    score: f64,
    reasoning: String,
}

#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, profile: &ParsedResume, job: &JobRow) -> Result<MatchReport, AppError>;
}

/// The default scorer: one completion call with the candidate summary and the
/// job fields.
pub struct LlmMatchScorer(pub LlmClient);

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, profile: &ParsedResume, job: &JobRow) -> Result<MatchReport, AppError> {
        let prompt = build_match_prompt(profile, job);
        let raw: RawMatchReport = self
            .0
            .call_json(&prompt, MATCH_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("match scoring failed: {e}")))?;
        Ok(normalize_report(raw))
    }
}

fn build_match_prompt(profile: &ParsedResume, job: &JobRow) -> String {
    MATCH_PROMPT
        .replace("{job_title}", &job.title)
        .replace("{job_company}", &job.company)
        .replace("{job_description}", &job.description)
        .replace("{skills}", &summarize_skills(profile))
        .replace("{experience}", &summarize_experience(profile))
}

fn normalize_report(raw: RawMatchReport) -> MatchReport {
    MatchReport {
        score: (raw.score.round() as i32).clamp(0, 100),
        reasoning: raw.reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resumes::parser::{SkillEntry, WorkExperience};
    use chrono::Utc;
    use uuid::Uuid;

    fn make_job() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Platform Engineer".to_string(),
            company: "Initech".to_string(),
            location: Some("Remote".to_string()),
            description: "Own the billing platform".to_string(),
            url: None,
            match_score: None,
            match_reasoning: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_profile() -> ParsedResume {
        ParsedResume {
            skills: vec![SkillEntry::Name("Rust".to_string())],
            experience: vec![WorkExperience {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2020-2024".to_string(),
                description: "Shipped services".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_includes_job_and_candidate() {
        let prompt = build_match_prompt(&make_profile(), &make_job());
        assert!(prompt.contains("Title: Platform Engineer"));
        assert!(prompt.contains("Company: Initech"));
        assert!(prompt.contains("Own the billing platform"));
        assert!(prompt.contains("CANDIDATE SKILLS: Rust"));
        assert!(prompt.contains("Engineer at Acme: Shipped services"));
    }

    #[test]
    fn test_prompt_has_no_unreplaced_placeholders() {
        let prompt = build_match_prompt(&make_profile(), &make_job());
        assert!(!prompt.contains('{'), "unfilled placeholder in: {prompt}");
    }

    #[test]
    fn test_empty_profile_uses_fallback_lines() {
        let prompt = build_match_prompt(&ParsedResume::default(), &make_job());
        assert!(prompt.contains("No skills found"));
        assert!(prompt.contains("No experience found"));
    }

    #[test]
    fn test_normalize_clamps_high_scores() {
        let report = normalize_report(RawMatchReport {
            score: 250.0,
            reasoning: "great".to_string(),
        });
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_normalize_clamps_negative_scores() {
        let report = normalize_report(RawMatchReport {
            score: -5.0,
            reasoning: "poor".to_string(),
        });
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_normalize_rounds_fractional_scores() {
        let report = normalize_report(RawMatchReport {
            score: 87.6,
            reasoning: "good".to_string(),
        });
        assert_eq!(report.score, 88);
    }
}
