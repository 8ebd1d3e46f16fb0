//! About page reads and admin-only edits.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::access;
use crate::domain::entities::{AboutPage, Actor};
use crate::domain::repositories::AboutRepository;
use crate::error::AppError;

pub struct AboutService<R: AboutRepository> {
    repository: Arc<R>,
}

impl<R: AboutRepository> AboutService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the page, or [`AppError::NotFound`] if it was never written.
    pub async fn get(&self) -> Result<AboutPage, AppError> {
        self.repository
            .get()
            .await?
            .ok_or_else(|| AppError::not_found("About page not found", json!({})))
    }

    /// Replaces the page content on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `actor` is an admin.
    pub async fn update(&self, content: &str, actor: &Actor) -> Result<AboutPage, AppError> {
        if !access::can_edit_site_content(actor) {
            return Err(AppError::forbidden(
                "Admin access required",
                json!({"reason": "not_admin"}),
            ));
        }

        let page = self.repository.upsert(content, actor.user_id).await?;
        info!(user_id = actor.user_id, "About page updated");

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAboutRepository;
    use chrono::Utc;

    fn page(content: &str, by: i64) -> AboutPage {
        AboutPage {
            id: 1,
            content: content.to_string(),
            last_modified: Utc::now(),
            modified_by: Some(by),
            modified_by_username: Some("admin".to_string()),
        }
    }

    #[tokio::test]
    async fn test_get_missing_page() {
        let mut repo = MockAboutRepository::new();
        repo.expect_get().returning(|| Ok(None));

        let svc = AboutService::new(Arc::new(repo));

        assert!(matches!(svc.get().await, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_admin_can_update() {
        let mut repo = MockAboutRepository::new();
        repo.expect_upsert()
            .withf(|content, by| content == "Hello" && *by == 1)
            .times(1)
            .returning(|content, by| Ok(page(content, by)));

        let svc = AboutService::new(Arc::new(repo));
        let updated = svc.update("Hello", &Actor::admin(1)).await.unwrap();

        assert_eq!(updated.content, "Hello");
        assert_eq!(updated.modified_by, Some(1));
    }

    #[tokio::test]
    async fn test_regular_user_cannot_update() {
        let mut repo = MockAboutRepository::new();
        repo.expect_upsert().times(0);

        let svc = AboutService::new(Arc::new(repo));
        let err = svc.update("Hacked", &Actor::user(2)).await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden { .. }));
    }
}
