use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Entry {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    pub image_path: Option<String>,
    pub keywords: String,
    pub created_at: DateTime<Utc>,
}

/// Fields written by both create and update. `keywords` is optional: when it
/// is missing or blank the keywords are derived from `content`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryInput {
    pub title: Option<String>,
    pub content: String,
    pub keywords: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}
