//! Repository trait for URL mapping data access.

use crate::domain::entities::{InsertOutcome, ListCursor, NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for URL mappings.
///
/// Owns persistence and both uniqueness invariants (`short_code` and
/// `original_url`). Implementations must enforce them at the point of write
/// so that the check-then-insert sequence in the service stays safe under
/// races: the loser of a race gets [`InsertOutcome::CodeTaken`] or
/// [`InsertOutcome::UrlTaken`], never a partial write.
///
/// Every `find_*` method returns `Ok(None)` for absence rather than a
/// default-valued record.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a new mapping with `click_count = 0` and no last access.
    ///
    /// # Returns
    ///
    /// - `Ok(InsertOutcome::Created(_))` with the stored row (creator joined)
    /// - `Ok(InsertOutcome::CodeTaken)` if the short code is already used
    /// - `Ok(InsertOutcome::UrlTaken)` if the original URL is already shortened
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the creator no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<InsertOutcome, AppError>;

    /// Finds a mapping by its surrogate id.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its original URL.
    ///
    /// Used to reject duplicate shorten requests before generating a code.
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlMapping>, AppError>;

    /// Returns true if a mapping with this short code exists.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Lists mappings newest first, with creator identity joined in.
    ///
    /// # Arguments
    ///
    /// - `offset` - Number of rows to skip
    /// - `limit` - Maximum number of rows to return
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlMapping>, AppError>;

    /// Lists up to `limit` mappings that come after `cursor` in newest-first
    /// order, or from the start when `cursor` is `None`.
    ///
    /// Unlike offset paging, a page is never shifted by concurrent inserts
    /// or deletes.
    async fn list_after(
        &self,
        cursor: Option<ListCursor>,
        limit: i64,
    ) -> Result<Vec<UrlMapping>, AppError>;

    /// Counts all mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Removes a mapping entirely.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Atomically increments `click_count` and sets `last_accessed = at`.
    ///
    /// Returns `Ok(false)` if no mapping has this code.
    async fn record_visit(&self, code: &str, at: DateTime<Utc>) -> Result<bool, AppError>;
}
