//! About page singleton.

use chrono::{DateTime, Utc};

/// Free-form site description, editable by admins only.
///
/// `modified_by` is cleared if the editing account is later deleted.
#[derive(Debug, Clone)]
pub struct AboutPage {
    pub id: i16,
    pub content: String,
    pub last_modified: DateTime<Utc>,
    pub modified_by: Option<i64>,
    pub modified_by_username: Option<String>,
}
