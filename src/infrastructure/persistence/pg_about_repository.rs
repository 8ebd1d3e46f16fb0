//! PostgreSQL implementation of the About page repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::AboutPage;
use crate::domain::repositories::AboutRepository;
use crate::error::AppError;
use crate::utils::db_error::is_foreign_key_violation;

#[derive(FromRow)]
struct AboutRow {
    id: i16,
    content: String,
    last_modified: DateTime<Utc>,
    modified_by: Option<i64>,
    modified_by_username: Option<String>,
}

impl From<AboutRow> for AboutPage {
    fn from(r: AboutRow) -> Self {
        AboutPage {
            id: r.id,
            content: r.content,
            last_modified: r.last_modified,
            modified_by: r.modified_by,
            modified_by_username: r.modified_by_username,
        }
    }
}

pub struct PgAboutRepository {
    pool: Arc<PgPool>,
}

impl PgAboutRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AboutRepository for PgAboutRepository {
    async fn get(&self) -> Result<Option<AboutPage>, AppError> {
        let row = sqlx::query_as::<_, AboutRow>(
            r#"
            SELECT a.id, a.content, a.last_modified, a.modified_by,
                   u.username AS modified_by_username
            FROM about_page a
            LEFT JOIN users u ON u.id = a.modified_by
            WHERE a.id = 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn upsert(&self, content: &str, modified_by: i64) -> Result<AboutPage, AppError> {
        let row = sqlx::query_as::<_, AboutRow>(
            r#"
            WITH saved AS (
                INSERT INTO about_page (id, content, last_modified, modified_by)
                VALUES (1, $1, NOW(), $2)
                ON CONFLICT (id) DO UPDATE
                SET content = EXCLUDED.content,
                    last_modified = EXCLUDED.last_modified,
                    modified_by = EXCLUDED.modified_by
                RETURNING id, content, last_modified, modified_by
            )
            SELECT s.id, s.content, s.last_modified, s.modified_by,
                   u.username AS modified_by_username
            FROM saved s
            LEFT JOIN users u ON u.id = s.modified_by
            "#,
        )
        .bind(content)
        .bind(modified_by)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Account no longer exists", "user_id": modified_by}),
                )
            } else {
                e.into()
            }
        })?;

        Ok(row.into())
    }
}
