//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, ListCursor, NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::db_error::{
    ORIGINAL_URL_KEY, SHORT_CODE_KEY, is_foreign_key_violation, unique_violation_constraint,
};

/// Columns selected for every mapping read, creator joined in.
const MAPPING_COLUMNS: &str = r#"
    m.id, m.original_url, m.short_code, m.created_by,
    u.username AS creator_username,
    m.created_at, m.click_count, m.last_accessed
"#;

#[derive(FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_by: i64,
    creator_username: String,
    created_at: DateTime<Utc>,
    click_count: i64,
    last_accessed: Option<DateTime<Utc>>,
}

impl From<MappingRow> for UrlMapping {
    fn from(r: MappingRow) -> Self {
        UrlMapping {
            id: r.id,
            original_url: r.original_url,
            short_code: r.short_code,
            created_by: r.created_by,
            creator_username: r.creator_username,
            created_at: r.created_at,
            click_count: r.click_count,
            last_accessed: r.last_accessed,
        }
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness of `short_code` and `original_url` is enforced by the unique
/// constraints named in [`crate::utils::db_error`]; a failed insert is
/// classified by constraint name.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<UrlMapping>, AppError> {
        let sql = format!(
            "SELECT {MAPPING_COLUMNS} FROM url_mappings m JOIN users u ON u.id = m.created_by WHERE {filter} = $1"
        );

        let row = sqlx::query_as::<_, MappingRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query_as::<_, MappingRow>(
            r#"
            WITH inserted AS (
                INSERT INTO url_mappings (original_url, short_code, created_by)
                VALUES ($1, $2, $3)
                RETURNING id, original_url, short_code, created_by, created_at, click_count, last_accessed
            )
            SELECT
                i.id, i.original_url, i.short_code, i.created_by,
                u.username AS creator_username,
                i.created_at, i.click_count, i.last_accessed
            FROM inserted i
            JOIN users u ON u.id = i.created_by
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_code)
        .bind(new_mapping.created_by)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Created(row.into())),
            Err(e) => match unique_violation_constraint(&e) {
                Some(SHORT_CODE_KEY) => Ok(InsertOutcome::CodeTaken),
                Some(ORIGINAL_URL_KEY) => Ok(InsertOutcome::UrlTaken),
                _ if is_foreign_key_violation(&e) => Err(AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Account no longer exists", "user_id": new_mapping.created_by}),
                )),
                _ => Err(e.into()),
            },
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlMapping>, AppError> {
        let sql = format!(
            "SELECT {MAPPING_COLUMNS} FROM url_mappings m JOIN users u ON u.id = m.created_by WHERE m.id = $1"
        );

        let row = sqlx::query_as::<_, MappingRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.find_one("m.short_code", code).await
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        self.find_one("m.original_url", original_url).await
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM url_mappings WHERE short_code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        let sql = format!(
            r#"
            SELECT {MAPPING_COLUMNS}
            FROM url_mappings m
            JOIN users u ON u.id = m.created_by
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $1 OFFSET $2
            "#
        );

        let rows = sqlx::query_as::<_, MappingRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_after(
        &self,
        cursor: Option<ListCursor>,
        limit: i64,
    ) -> Result<Vec<UrlMapping>, AppError> {
        let rows = match cursor {
            Some(cursor) => {
                let sql = format!(
                    r#"
                    SELECT {MAPPING_COLUMNS}
                    FROM url_mappings m
                    JOIN users u ON u.id = m.created_by
                    WHERE (m.created_at, m.id) < ($1, $2)
                    ORDER BY m.created_at DESC, m.id DESC
                    LIMIT $3
                    "#
                );

                sqlx::query_as::<_, MappingRow>(&sql)
                    .bind(cursor.created_at)
                    .bind(cursor.id)
                    .bind(limit)
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
            None => {
                let sql = format!(
                    r#"
                    SELECT {MAPPING_COLUMNS}
                    FROM url_mappings m
                    JOIN users u ON u.id = m.created_by
                    ORDER BY m.created_at DESC, m.id DESC
                    LIMIT $1
                    "#
                );

                sqlx::query_as::<_, MappingRow>(&sql)
                    .bind(limit)
                    .fetch_all(self.pool.as_ref())
                    .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM url_mappings WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_visit(&self, code: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        // Single statement: concurrent visits never lose an increment.
        let result = sqlx::query(
            r#"
            UPDATE url_mappings
            SET click_count = click_count + 1,
                last_accessed = GREATEST(COALESCE(last_accessed, $2), $2)
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .bind(at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
