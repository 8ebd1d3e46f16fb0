//! DTOs for the About page endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::AboutPage;

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub id: i16,
    pub content: String,
    pub last_modified: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl From<AboutPage> for AboutResponse {
    fn from(page: AboutPage) -> Self {
        Self {
            id: page.id,
            content: page.content,
            last_modified: page.last_modified,
            modified_by: page.modified_by_username,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAboutRequest {
    #[validate(length(max = 20000, message = "Content is too long"))]
    pub content: String,
}
