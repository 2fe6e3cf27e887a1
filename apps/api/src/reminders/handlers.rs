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
use crate::models::reminder::ReminderRow;
use crate::state::AppState;

/// Reminder listing shape: the row plus the linked application's job
/// headline, when the reminder is attached to one.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReminderListRow {
    pub id: Uuid,
    pub application_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub job_company: Option<String>,
}

const LIST_QUERY: &str = r#"
SELECT rm.id, rm.application_id, rm.title, rm.description, rm.due_date,
       rm.is_completed, rm.created_at,
       j.title AS job_title, j.company AS job_company
FROM reminders rm
LEFT JOIN applications a ON a.id = rm.application_id
LEFT JOIN jobs j ON j.id = a.job_id
WHERE rm.user_id = $1
ORDER BY rm.due_date ASC
"#;

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub application_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub is_completed: bool,
}

/// GET /api/v1/reminders
pub async fn handle_list_reminders(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ReminderListRow>>, AppError> {
    let reminders = sqlx::query_as::<_, ReminderListRow>(LIST_QUERY)
        .bind(user.user_id)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(reminders))
}

/// POST /api/v1/reminders
pub async fn handle_create_reminder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateReminderRequest>,
) -> Result<Json<ReminderRow>, AppError> {
    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    if let Some(application_id) = request.application_id {
        let owned: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM applications WHERE id = $1 AND user_id = $2")
                .bind(application_id)
                .bind(user.user_id)
                .fetch_optional(&state.db)
                .await?;
        if owned.is_none() {
            return Err(AppError::NotFound(format!(
                "Application {application_id} not found"
            )));
        }
    }

    let description = request
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let reminder: ReminderRow = sqlx::query_as(
        r#"
        INSERT INTO reminders (user_id, application_id, title, description, due_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(request.application_id)
    .bind(&title)
    .bind(&description)
    .bind(request.due_date)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(reminder))
}

/// PATCH /api/v1/reminders/:id/complete
pub async fn handle_complete_reminder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reminder_id): Path<Uuid>,
    Json(request): Json<CompleteRequest>,
) -> Result<StatusCode, AppError> {
    let result =
        sqlx::query("UPDATE reminders SET is_completed = $1 WHERE id = $2 AND user_id = $3")
            .bind(request.is_completed)
            .bind(reminder_id)
            .bind(user.user_id)
            .execute(&state.db)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Reminder {reminder_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/reminders/:id
pub async fn handle_delete_reminder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(reminder_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(reminder_id)
        .bind(user.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Reminder {reminder_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
