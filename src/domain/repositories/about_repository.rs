//! Repository trait for the About page singleton.

use crate::domain::entities::AboutPage;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Returns the page, or `None` if it was never written.
    async fn get(&self) -> Result<Option<AboutPage>, AppError>;

    /// Creates or replaces the page content, recording who changed it.
    async fn upsert(&self, content: &str, modified_by: i64) -> Result<AboutPage, AppError>;
}
