use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::state::AppState;

/// Application listing shape: the row plus the joined job headline and the
/// file name of the résumé it was sent with.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationListRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: String,
    pub job_company: String,
    pub resume_file_name: Option<String>,
}

const LIST_QUERY: &str = r#"
SELECT a.id, a.job_id, a.resume_id, a.status, a.applied_date, a.notes,
       a.created_at, a.updated_at,
       j.title AS job_title, j.company AS job_company,
       r.file_name AS resume_file_name
FROM applications a
JOIN jobs j ON j.id = a.job_id
LEFT JOIN resumes r ON r.id = a.resume_id
WHERE a.user_id = $1
ORDER BY a.created_at DESC
"#;

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: Uuid,
    pub resume_id: Option<Uuid>,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ApplicationListRow>>, AppError> {
    let applications = sqlx::query_as::<_, ApplicationListRow>(LIST_QUERY)
        .bind(user.user_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(applications))
}

/// POST /api/v1/applications
///
/// The referenced job, and résumé when given, must belong to the caller.
pub async fn handle_create_application(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let job_owned: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1 AND user_id = $2")
            .bind(request.job_id)
            .bind(user.user_id)
            .fetch_optional(&state.db)
            .await?;
    if job_owned.is_none() {
        return Err(AppError::NotFound(format!(
            "Job {} not found",
            request.job_id
        )));
    }

    if let Some(resume_id) = request.resume_id {
        let resume_owned: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(resume_id)
                .bind(user.user_id)
                .fetch_optional(&state.db)
                .await?;
        if resume_owned.is_none() {
            return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
        }
    }

    let notes = request
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let application: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications (user_id, job_id, resume_id, status, applied_date, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(request.job_id)
    .bind(request.resume_id)
    .bind(request.status)
    .bind(request.applied_date)
    .bind(&notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(application))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query(
        "UPDATE applications SET status = $1, updated_at = now() WHERE id = $2 AND user_id = $3",
    )
    .bind(request.status)
    .bind(application_id)
    .bind(user.user_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Application {application_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
        .bind(application_id)
        .bind(user.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Application {application_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
