//! URL mapping entity: the (original URL, short code) pair plus usage stats.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `original_url` and `short_code` are each unique across all mappings.
/// `created_by` never changes after creation and `click_count` only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_by: i64,
    pub creator_username: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl UrlMapping {
    /// Returns true if the link has been visited at least once.
    pub fn was_visited(&self) -> bool {
        self.last_accessed.is_some()
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.created_by == user_id
    }

    /// Position of this mapping in the newest-first listing order.
    pub fn cursor(&self) -> ListCursor {
        ListCursor {
            created_at: self.created_at,
            id: self.id,
        }
    }
}

/// Keyset position in the newest-first order `(created_at DESC, id DESC)`.
///
/// Reading "everything before this cursor" is unaffected by rows inserted
/// or deleted elsewhere in the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl ListCursor {
    /// True if `mapping` comes strictly after this cursor in listing order.
    pub fn precedes(&self, mapping: &UrlMapping) -> bool {
        (mapping.created_at, mapping.id) < (self.created_at, self.id)
    }
}

/// Input data for creating a new mapping.
///
/// Click count starts at zero and last access is absent; neither is
/// settable at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_code: String,
    pub created_by: i64,
}

/// Result of a write that may lose against a uniqueness constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Created(UrlMapping),
    /// Another mapping already holds the short code.
    CodeTaken,
    /// Another mapping already targets the original URL.
    UrlTaken,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> UrlMapping {
        UrlMapping {
            id: 1,
            original_url: "https://example.com/a".to_string(),
            short_code: "aB3xY9".to_string(),
            created_by: 7,
            creator_username: "alice".to_string(),
            created_at: Utc::now(),
            click_count: 0,
            last_accessed: None,
        }
    }

    #[test]
    fn test_fresh_mapping_not_visited() {
        let m = mapping();
        assert!(!m.was_visited());
        assert_eq!(m.click_count, 0);
    }

    #[test]
    fn test_ownership() {
        let m = mapping();
        assert!(m.is_owned_by(7));
        assert!(!m.is_owned_by(8));
    }
}
