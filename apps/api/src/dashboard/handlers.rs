use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::FromRow;

use crate::applications::handlers::ApplicationListRow;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::reminders::handlers::ReminderListRow;
use crate::state::AppState;

/// How many recent applications and upcoming reminders the dashboard shows.
const DASHBOARD_WINDOW: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_applications: i64,
    pub interviews: i64,
    pub offers: i64,
    pub pending_reminders: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_applications: Vec<ApplicationListRow>,
    pub upcoming_reminders: Vec<ReminderListRow>,
    /// Distinct skill names across all of the user's résumés.
    pub skills: Vec<String>,
}

#[derive(Debug, FromRow)]
struct ApplicationCounts {
    total: i64,
    interviews: i64,
    offers: i64,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let counts: ApplicationCounts = sqlx::query_as(
        r#"
        SELECT COUNT(*) AS total,
               COUNT(*) FILTER (WHERE status = 'interview') AS interviews,
               COUNT(*) FILTER (WHERE status = 'offer') AS offers
        FROM applications
        WHERE user_id = $1
        "#,
    )
    .bind(user.user_id)
    .fetch_one(&state.db)
    .await?;

    let pending_reminders: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM reminders WHERE user_id = $1 AND is_completed = FALSE",
    )
    .bind(user.user_id)
    .fetch_one(&state.db)
    .await?;

    let recent_applications = sqlx::query_as::<_, ApplicationListRow>(
        r#"
        SELECT a.id, a.job_id, a.resume_id, a.status, a.applied_date, a.notes,
               a.created_at, a.updated_at,
               j.title AS job_title, j.company AS job_company,
               r.file_name AS resume_file_name
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        LEFT JOIN resumes r ON r.id = a.resume_id
        WHERE a.user_id = $1
        ORDER BY a.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user.user_id)
    .bind(DASHBOARD_WINDOW)
    .fetch_all(&state.db)
    .await?;

    let upcoming_reminders = sqlx::query_as::<_, ReminderListRow>(
        r#"
        SELECT rm.id, rm.application_id, rm.title, rm.description, rm.due_date,
               rm.is_completed, rm.created_at,
               j.title AS job_title, j.company AS job_company
        FROM reminders rm
        LEFT JOIN applications a ON a.id = rm.application_id
        LEFT JOIN jobs j ON j.id = a.job_id
        WHERE rm.user_id = $1 AND rm.is_completed = FALSE
        ORDER BY rm.due_date ASC
        LIMIT $2
        "#,
    )
    .bind(user.user_id)
    .bind(DASHBOARD_WINDOW)
    .fetch_all(&state.db)
    .await?;

    let skills: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT skill_name FROM parsed_skills WHERE user_id = $1 ORDER BY skill_name",
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(DashboardResponse {
        stats: DashboardStats {
            total_applications: counts.total,
            interviews: counts.interviews,
            offers: counts.offers,
            pending_reminders,
        },
        recent_applications,
        upcoming_reminders,
        skills,
    }))
}
