use crate::domain::settings::{FilterSpec, Settings, SettingsRepository};
use crate::error::AppResult;
use crate::infrastructure::db::{check_connection, DbPool};
use async_trait::async_trait;
use sqlx::FromRow;
use std::sync::Arc;

#[derive(Debug, Clone, FromRow)]
struct SettingsRow {
    filtering_regexp_str: String,
    feed_sources: Vec<String>,
}

/// PostgreSQL-backed settings store. The latest row wins.
pub struct PgSettingsRepository {
    pool: Arc<DbPool>,
}

impl PgSettingsRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Persist a new settings row, rejecting invalid patterns before they reach the table
    pub async fn save(&self, pattern: &str, sources: &[String]) -> AppResult<Settings> {
        let filter = FilterSpec::parse(pattern)?;
        let pool = self.pool.as_ref();

        sqlx::query(
            r#"
            INSERT INTO settings (filtering_regexp_str, feed_sources, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            "#,
        )
        .bind(pattern)
        .bind(sources)
        .execute(pool)
        .await?;

        Ok(Settings::new(filter, sources.to_vec()))
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn load(&self) -> AppResult<Settings> {
        let pool = self.pool.as_ref();
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT filtering_regexp_str, feed_sources
            FROM settings
            ORDER BY updated_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(pool)
        .await?;

        match row {
            Some(row) => Ok(Settings::new(
                FilterSpec::parse(&row.filtering_regexp_str)?,
                row.feed_sources,
            )),
            None => {
                tracing::debug!("No settings stored yet, using defaults");
                Ok(Settings::default())
            }
        }
    }

    async fn check(&self) -> bool {
        check_connection(&self.pool).await.unwrap_or(false)
    }
}
