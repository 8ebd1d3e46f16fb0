//! Visit event model for asynchronous click accounting.

use chrono::{DateTime, Utc};

/// A successful resolution waiting to be counted.
///
/// Sent from the redirect handler to the background worker over a bounded
/// channel so the redirect response never waits on the counter write.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler after the code resolved
/// 2. Sent to the channel with `try_send` (dropped if the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Applied via [`crate::application::services::ShorteningService::record_visit_at`]
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub visited_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates an event stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            visited_at: Utc::now(),
        }
    }
}
