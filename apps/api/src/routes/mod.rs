pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::dashboard::handlers as dashboard;
use crate::discover::handlers as discover;
use crate::jobs::handlers as jobs;
use crate::reminders::handlers as reminders;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Uploaded résumés are capped at 10 MiB.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload_resume).get(resumes::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route("/api/v1/skills", get(resumes::handle_list_skills))
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route("/api/v1/jobs/:id", delete(jobs::handle_delete_job))
        .route("/api/v1/jobs/:id/match", post(jobs::handle_match_job))
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications).post(applications::handle_create_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handle_update_status),
        )
        .route(
            "/api/v1/applications/:id",
            delete(applications::handle_delete_application),
        )
        // Reminders
        .route(
            "/api/v1/reminders",
            get(reminders::handle_list_reminders).post(reminders::handle_create_reminder),
        )
        .route(
            "/api/v1/reminders/:id/complete",
            patch(reminders::handle_complete_reminder),
        )
        .route(
            "/api/v1/reminders/:id",
            delete(reminders::handle_delete_reminder),
        )
        // Dashboard & discovery
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route("/api/v1/discover", post(discover::handle_discover))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
