//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Deleting a user removes every mapping they created (referential cascade).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Lists all users with the number of mappings each one owns.
    async fn list_with_counts(&self) -> Result<Vec<UserSummary>, AppError>;

    /// Deletes a user and, by cascade, all of their mappings.
    ///
    /// Returns `Ok(false)` if the user did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
