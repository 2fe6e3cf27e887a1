use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{ParsedSkillRow, ResumeRow};
use crate::resumes::extract::{self, DocumentKind};
use crate::resumes::parser::{self, ParsedResume};
use crate::resumes::storage;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub resume: ResumeRow,
    pub parsed_data: ParsedResume,
}

struct Upload {
    file_name: String,
    content_type: String,
    data: Bytes,
}

/// POST /api/v1/resumes
///
/// Multipart upload pipeline: extract text, store the original file, parse
/// the text with the LLM, persist the résumé row and its skill rows.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let upload = read_file_field(multipart).await?;

    let kind = DocumentKind::from_content_type(&upload.content_type)
        .ok_or_else(|| AppError::Validation("Please upload a PDF or DOCX file".to_string()))?;

    let raw_text = extract::extract_text(kind, &upload.data)?;

    let file_path = storage::object_key(user.user_id, &upload.file_name);
    storage::put_resume(
        &state.s3,
        &state.config.s3_bucket,
        &file_path,
        &upload.content_type,
        upload.data.clone(),
    )
    .await?;

    let parsed = parser::parse_resume(&raw_text, &state.llm).await?;
    let parsed_json = serde_json::to_value(&parsed)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing parsed resume: {e}")))?;

    let mut tx = state.db.begin().await?;

    let resume: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (user_id, file_name, file_path, raw_text, parsed_data)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(&upload.file_name)
    .bind(&file_path)
    .bind(&raw_text)
    .bind(&parsed_json)
    .fetch_one(&mut *tx)
    .await?;

    for (skill_name, category) in parser::skill_records(&parsed) {
        sqlx::query(
            "INSERT INTO parsed_skills (resume_id, user_id, skill_name, category) VALUES ($1, $2, $3, $4)",
        )
        .bind(resume.id)
        .bind(user.user_id)
        .bind(&skill_name)
        .bind(&category)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(user_id = %user.user_id, resume_id = %resume.id, "resume uploaded and parsed");

    Ok(Json(UploadResumeResponse {
        resume,
        parsed_data: parsed,
    }))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume =
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user.user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
///
/// Removes the stored file (best effort), the derived skills, and the row.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(resume_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let resume =
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user.user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    if let Err(e) =
        storage::delete_resume(&state.s3, &state.config.s3_bucket, &resume.file_path).await
    {
        // The row delete still proceeds; the orphaned object is harmless
        tracing::warn!(resume_id = %resume_id, "failed to delete stored file: {e}");
    }

    sqlx::query("DELETE FROM parsed_skills WHERE resume_id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user.user_id)
        .execute(&state.db)
        .await?;

    sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user.user_id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ParsedSkillRow>>, AppError> {
    let skills = sqlx::query_as::<_, ParsedSkillRow>(
        "SELECT * FROM parsed_skills WHERE user_id = $1 ORDER BY skill_name",
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(skills))
}

async fn read_file_field(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        return Ok(Upload {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::Validation(
        "Missing 'file' field in multipart body".to_string(),
    ))
}
