use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub raw_text: Option<String>,
    /// Model-extracted profile, stored verbatim as JSONB.
    pub parsed_data: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// A single skill extracted from a résumé.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParsedSkillRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub skill_name: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}
