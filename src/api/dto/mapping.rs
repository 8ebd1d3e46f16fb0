//! Response shape for URL mappings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlMapping;

#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    /// Creator's username.
    pub created_by: String,
    pub created_by_id: i64,
}

impl MappingResponse {
    pub fn from_mapping(mapping: UrlMapping, short_url: String) -> Self {
        Self {
            id: mapping.id,
            original_url: mapping.original_url,
            short_code: mapping.short_code,
            short_url,
            created_at: mapping.created_at,
            click_count: mapping.click_count,
            last_accessed: mapping.last_accessed,
            created_by: mapping.creator_username,
            created_by_id: mapping.created_by,
        }
    }
}
