//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The visit is handed to the click worker through a bounded channel and
/// the redirect is answered without waiting for it. If the queue is full
/// the visit is dropped; a slow database never slows down or fails a
/// redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mapping = state.shortening_service.resolve(&code).await?;

    metrics::counter!("redirects_total").increment(1);

    match state.click_sender.try_send(ClickEvent::new(code)) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("click_events_dropped_total").increment(1);
            warn!(code = %event.code, "Click queue full, visit not counted");
        }
        Err(TrySendError::Closed(event)) => {
            warn!(code = %event.code, "Click queue closed, visit not counted");
        }
    }

    Ok(Redirect::temporary(&mapping.original_url))
}
