//! Application configuration and state for the worksheet API

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use gigachat_client::{GigaChatClient, ProviderConfig};
use latex_engine::{CompilerConfig, LatexCompiler};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::HistoryRecord;

/// Process configuration, read from the environment exactly once at startup
/// and passed by reference from then on.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// GigaChat authorization key (may be empty; provider calls then fail
    /// with a typed error instead of preventing startup).
    pub credentials: String,
    pub scope: String,
    /// Skip the local TeX toolchain; remote compilation only.
    pub remote_latex_only: bool,
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
    pub database_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let credentials = std::env::var("GIGACHAT_CREDENTIALS").unwrap_or_default();
        if credentials.is_empty() {
            tracing::warn!("GIGACHAT_CREDENTIALS not set; provider calls will fail");
        }

        Self {
            credentials,
            scope: std::env::var("GIGACHAT_SCOPE")
                .unwrap_or_else(|_| "GIGACHAT_API_PERS".to_string()),
            remote_latex_only: std::env::var("USE_REMOTE_LATEX")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("generated")),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:worksheets.db?mode=rwc".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}

pub struct AppState {
    pub db: SqlitePool,
    pub provider: GigaChatClient,
    pub compiler: LatexCompiler,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        tracing::info!("Connecting to database: {}", config.database_url);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await?;
        Self::run_migrations(&pool).await?;

        let provider = GigaChatClient::new(ProviderConfig::new(
            config.credentials.clone(),
            config.scope.clone(),
        ))?;

        let compiler = LatexCompiler::new(CompilerConfig::new(
            config.output_dir.clone(),
            !config.remote_latex_only,
        ));

        Ok(Self {
            db: pool,
            provider,
            compiler,
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                topic TEXT NOT NULL,
                teacher_name TEXT NOT NULL DEFAULT '',
                latex_code TEXT NOT NULL,
                pdf_url TEXT NOT NULL,
                keys_url TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Append one generated worksheet to the history. Called only after a
    /// successful compile, so history never references a missing file.
    pub async fn append_history(
        &self,
        topic: &str,
        teacher_name: &str,
        latex_code: &str,
        pdf_url: &str,
        keys_url: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO history (topic, teacher_name, latex_code, pdf_url, keys_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(topic)
        .bind(teacher_name)
        .bind(latex_code)
        .bind(pdf_url)
        .bind(keys_url)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.db)
        .await?;
        Ok(())
    }

    /// Most-recent-first history, at most `limit` rows.
    pub async fn list_history(&self, limit: i64) -> Result<Vec<HistoryRecord>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, topic, teacher_name, latex_code, pdf_url, keys_url, created_at
            FROM history
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        AppState::run_migrations(&pool).await.unwrap();
        AppState {
            db: pool,
            provider: GigaChatClient::new(ProviderConfig::new(String::new(), String::new()))
                .unwrap(),
            compiler: LatexCompiler::new(CompilerConfig::new("generated", false)),
        }
    }

    #[tokio::test]
    async fn history_is_most_recent_first_and_bounded() {
        let state = memory_state().await;
        for i in 1..=5 {
            state
                .append_history(
                    &format!("Тема {i}"),
                    "",
                    "\\TaskBox{1}{x}",
                    &format!("/generated/worksheet_{i}.pdf"),
                    None,
                )
                .await
                .unwrap();
        }

        let rows = state.list_history(3).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].topic, "Тема 5");
        assert_eq!(rows[2].topic, "Тема 3");
        assert!(rows[0].id > rows[1].id && rows[1].id > rows[2].id);
    }

    #[tokio::test]
    async fn history_keeps_optional_key_url() {
        let state = memory_state().await;
        state
            .append_history(
                "Тема",
                "Иванова",
                "body",
                "/generated/worksheet_a.pdf",
                Some("/generated/worksheet_a_keys.pdf"),
            )
            .await
            .unwrap();

        let rows = state.list_history(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].keys_url.as_deref(),
            Some("/generated/worksheet_a_keys.pdf")
        );
        assert_eq!(rows[0].teacher_name, "Иванова");
    }
}
