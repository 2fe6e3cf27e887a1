//! AI job discovery: prompts the model for listings fitted to the user's
//! latest résumé. Results are ephemeral, nothing is persisted.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::discover::prompts::{DISCOVER_PROMPT, DISCOVER_SYSTEM};
use crate::errors::AppError;
use crate::jobs::handlers::{latest_resume, profile_from_resume};
use crate::resumes::parser::{summarize_education, summarize_experience, summarize_skills};
use crate::state::AppState;

const LINKEDIN_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/";

/// A generated listing as the model returns it.
#[derive(Debug, Deserialize)]
pub struct GeneratedJob {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary_range: String,
    pub match_score: f64,
    #[serde(default)]
    pub match_reasoning: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Deserialize)]
struct DiscoverPayload {
    jobs: Vec<GeneratedJob>,
}

/// A generated listing enriched with a real search link.
#[derive(Debug, Serialize)]
pub struct DiscoveredJob {
    pub company: String,
    pub role: String,
    pub location: String,
    pub salary_range: String,
    pub match_score: i32,
    pub match_reasoning: String,
    pub description: String,
    pub search_url: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct DiscoverResponse {
    pub jobs: Vec<DiscoveredJob>,
}

/// POST /api/v1/discover
pub async fn handle_discover(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DiscoverResponse>, AppError> {
    let resume = latest_resume(&state, user.user_id).await?.ok_or_else(|| {
        AppError::Validation("No resume found. Upload a resume first.".to_string())
    })?;

    let profile = profile_from_resume(&resume);
    let prompt = DISCOVER_PROMPT
        .replace("{skills}", &summarize_skills(&profile))
        .replace("{experience}", &summarize_experience(&profile))
        .replace("{education}", &summarize_education(&profile));

    let payload: DiscoverPayload = state
        .llm
        .call_json(&prompt, DISCOVER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("job discovery failed: {e}")))?;

    let jobs: Vec<DiscoveredJob> = payload.jobs.into_iter().map(enrich).collect();
    tracing::info!(user_id = %user.user_id, count = jobs.len(), "discovered job listings");

    Ok(Json(DiscoverResponse { jobs }))
}

fn enrich(job: GeneratedJob) -> DiscoveredJob {
    let search_url = search_url(&job.role, &job.company);
    DiscoveredJob {
        company: job.company,
        role: job.role,
        location: job.location,
        salary_range: job.salary_range,
        match_score: (job.match_score.round() as i32).clamp(0, 100),
        match_reasoning: job.match_reasoning,
        description: job.description,
        search_url,
        source: job.source,
    }
}

/// Builds a LinkedIn job-search URL with the role and company as keywords.
fn search_url(role: &str, company: &str) -> String {
    let keywords = format!("{role} {company}");
    reqwest::Url::parse_with_params(LINKEDIN_SEARCH_URL, &[("keywords", keywords.as_str())])
        .map(|u| u.to_string())
        .unwrap_or_else(|_| LINKEDIN_SEARCH_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_generated(score: f64) -> GeneratedJob {
        GeneratedJob {
            company: "Initech".to_string(),
            role: "Platform Engineer".to_string(),
            location: "Remote".to_string(),
            salary_range: "$140k - $180k".to_string(),
            match_score: score,
            match_reasoning: "Strong backend overlap".to_string(),
            description: "Own the platform".to_string(),
            source: "LinkedIn".to_string(),
        }
    }

    #[test]
    fn test_search_url_encodes_keywords() {
        let url = search_url("Platform Engineer", "Initech & Co");
        assert!(url.starts_with(LINKEDIN_SEARCH_URL));
        assert!(url.contains("keywords=Platform+Engineer+Initech+%26+Co"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_enrich_adds_search_url_and_clamps_score() {
        let job = enrich(make_generated(120.0));
        assert_eq!(job.match_score, 100);
        assert!(job.search_url.contains("linkedin.com/jobs/search"));
    }

    #[test]
    fn test_enrich_rounds_scores() {
        assert_eq!(enrich(make_generated(86.4)).match_score, 86);
    }

    #[test]
    fn test_payload_parses_model_shape() {
        let payload: DiscoverPayload = serde_json::from_str(
            r#"{"jobs": [{"company": "Initech", "role": "SRE", "location": "Remote",
                "salary_range": "$120k - $150k", "match_score": 77,
                "match_reasoning": "fit", "description": "desc", "source": "Indeed"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.jobs.len(), 1);
        assert_eq!(payload.jobs[0].company, "Initech");
    }

    #[test]
    fn test_payload_without_jobs_array_is_an_error() {
        let result: Result<DiscoverPayload, _> =
            serde_json::from_str(r#"{"listings": []}"#);
        assert!(result.is_err());
    }
}
