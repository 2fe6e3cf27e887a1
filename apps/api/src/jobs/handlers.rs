use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::matching::MatchReport;
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;
use crate::resumes::parser::ParsedResume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: String,
    pub url: Option<String>,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    let job = validate_job_request(request)?;

    let row: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs (user_id, title, company, location, description, url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.location)
    .bind(&job.description)
    .bind(&job.url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(jobs))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/jobs/:id/match
///
/// Scores the user's most recent résumé against this job and persists the
/// score and reasoning onto the job row.
pub async fn handle_match_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<MatchReport>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user.user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let resume = latest_resume(&state, user.user_id).await?.ok_or_else(|| {
        AppError::Validation("No resume found. Upload a resume first.".to_string())
    })?;

    let profile = profile_from_resume(&resume);
    let report = state.match_scorer.score(&profile, &job).await?;

    sqlx::query(
        "UPDATE jobs SET match_score = $1, match_reasoning = $2, updated_at = now() WHERE id = $3 AND user_id = $4",
    )
    .bind(report.score)
    .bind(&report.reasoning)
    .bind(job_id)
    .bind(user.user_id)
    .execute(&state.db)
    .await?;

    tracing::info!(job_id = %job_id, score = report.score, "job match scored");

    Ok(Json(report))
}

/// The user's newest résumé, if any. Match scoring and discovery both key off
/// the most recent upload.
pub async fn latest_resume(
    state: &AppState,
    user_id: Uuid,
) -> Result<Option<ResumeRow>, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;
    Ok(resume)
}

/// Deserializes the stored profile; a résumé without parsed data behaves as
/// an empty profile (the prompt builders emit fallback lines).
pub fn profile_from_resume(resume: &ResumeRow) -> ParsedResume {
    resume
        .parsed_data
        .clone()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

struct ValidatedJob {
    title: String,
    company: String,
    location: Option<String>,
    description: String,
    url: Option<String>,
}

fn validate_job_request(request: CreateJobRequest) -> Result<ValidatedJob, AppError> {
    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    let company = request.company.trim().to_string();
    if company.is_empty() {
        return Err(AppError::Validation("Company is required".to_string()));
    }
    let description = request.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let location = non_empty(request.location);
    let url = non_empty(request.url);
    if let Some(u) = &url {
        if !(u.starts_with("http://") || u.starts_with("https://")) {
            return Err(AppError::Validation(
                "URL must start with http:// or https://".to_string(),
            ));
        }
    }

    Ok(ValidatedJob {
        title,
        company,
        location,
        description,
        url,
    })
}

/// Empty and whitespace-only optional strings collapse to None.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request() -> CreateJobRequest {
        CreateJobRequest {
            title: "Platform Engineer".to_string(),
            company: "Initech".to_string(),
            location: Some("Remote".to_string()),
            description: "Own the billing platform".to_string(),
            url: Some("https://initech.example/jobs/42".to_string()),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let job = validate_job_request(make_request()).unwrap();
        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(job.url.as_deref(), Some("https://initech.example/jobs/42"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let mut request = make_request();
        request.title = "   ".to_string();
        assert!(matches!(
            validate_job_request(request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_description_is_rejected() {
        let mut request = make_request();
        request.description = String::new();
        assert!(matches!(
            validate_job_request(request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_url_collapses_to_none() {
        let mut request = make_request();
        request.url = Some("".to_string());
        let job = validate_job_request(request).unwrap();
        assert!(job.url.is_none());
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        let mut request = make_request();
        request.url = Some("ftp://initech.example".to_string());
        assert!(matches!(
            validate_job_request(request),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_profile_from_resume_tolerates_missing_data() {
        use chrono::Utc;
        let resume = ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            file_name: "cv.pdf".to_string(),
            file_path: "u/cv.pdf".to_string(),
            raw_text: None,
            parsed_data: None,
            created_at: Utc::now(),
        };
        let profile = profile_from_resume(&resume);
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_profile_from_resume_reads_stored_json() {
        use chrono::Utc;
        let resume = ResumeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            file_name: "cv.pdf".to_string(),
            file_path: "u/cv.pdf".to_string(),
            raw_text: Some("text".to_string()),
            parsed_data: Some(serde_json::json!({"name": "Jane", "skills": ["Rust"]})),
            created_at: Utc::now(),
        };
        let profile = profile_from_resume(&resume);
        assert_eq!(profile.name.as_deref(), Some("Jane"));
        assert_eq!(profile.skills.len(), 1);
    }
}
