//! Data models for the worksheet API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Topic assumed when the client sends none.
pub const DEFAULT_TOPIC: &str = "Рабочий лист";

/// Model assumed when the client sends none.
pub const DEFAULT_MODEL: &str = "GigaChat-Max";

/// Response from `/api/process`: extracted body markup for client review.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    pub latex_code: String,
    pub model: String,
}

/// Request to `/api/compile`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileRequest {
    pub latex_code: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub is_variant2: bool,
    #[serde(default = "default_layout")]
    pub layout: String,
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_layout() -> String {
    "1col".to_string()
}

/// Response from `/api/compile`.
#[derive(Debug, Clone, Serialize)]
pub struct CompileResponse {
    pub pdf_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys_url: Option<String>,
}

/// Form body of `/api/generate_similar`. Numeric fields arrive as form
/// strings; coercion failures fall back to defaults downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSimilarRequest {
    #[serde(default)]
    pub original_text: String,
    #[serde(default)]
    pub task_count: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub difficulty: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Response from `/api/generate_similar`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSimilarResponse {
    pub latex_code: String,
}

/// Query parameters of `/api/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// One generated worksheet, as stored and as returned.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoryRecord {
    pub id: i64,
    pub topic: String,
    pub teacher_name: String,
    pub latex_code: String,
    pub pdf_url: String,
    pub keys_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response from `/api/history`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryRecord>,
}
