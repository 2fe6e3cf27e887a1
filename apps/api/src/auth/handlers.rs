use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{password, tokens, AuthUser};
use crate::errors::AppError;
use crate::models::user::{PublicUser, UserRow};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&request.email);
    if !is_plausible_email(&email) {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    let full_name = request.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }

    let existing: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation(
            "An account with this email already exists".to_string(),
        ));
    }

    let password_hash = password::hash_password(&request.password)?;

    let user: UserRow = sqlx::query_as(
        "INSERT INTO users (email, password_hash, full_name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(full_name)
    .fetch_one(&state.db)
    .await?;

    let token = tokens::issue_token(user.id, &user.email, &state.config.jwt_secret)?;
    tracing::info!(user_id = %user.id, "new user signed up");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&request.email);

    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Unknown email and wrong password fail identically
    let user = user.ok_or(AppError::Unauthorized)?;
    if !password::verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = tokens::issue_token(user.id, &user.email, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(&state.db)
        .await?;

    // A valid token for a deleted account is no longer authorized
    row.map(|r| Json(r.into())).ok_or(AppError::Unauthorized)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Jane@Example.COM "), "jane@example.com");
    }

    #[test]
    fn test_plausible_email_accepts_normal_address() {
        assert!(is_plausible_email("jane@example.com"));
    }

    #[test]
    fn test_plausible_email_rejects_missing_at() {
        assert!(!is_plausible_email("janeexample.com"));
    }

    #[test]
    fn test_plausible_email_rejects_empty_local_part() {
        assert!(!is_plausible_email("@example.com"));
    }

    #[test]
    fn test_plausible_email_rejects_bare_domain() {
        assert!(!is_plausible_email("jane@localhost"));
        assert!(!is_plausible_email("jane@.com"));
    }
}
