//! Background worker that applies visit events to click counters.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::application::services::ShorteningService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::MappingRepository;
use crate::utils::code_generator::CodeGenerator;

/// Write attempts per event, including the first.
const RETRY_ATTEMPTS: usize = 3;

/// Drains the click channel until every sender is dropped.
///
/// Up to `concurrency` events are applied at once. Each event is retried
/// with exponential backoff; an event that still fails is logged and
/// counted, never re-queued. The redirect that produced it has already been
/// answered, so losing a count is preferred over blocking redirects.
pub async fn run_click_worker<M, G>(
    mut rx: mpsc::Receiver<ClickEvent>,
    service: Arc<ShorteningService<M, G>>,
    concurrency: usize,
) where
    M: MappingRepository + 'static,
    G: CodeGenerator + 'static,
{
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let service = service.clone();
        tokio::spawn(async move {
            let _permit = permit;
            apply_event(&service, event).await;
        });
    }

    // Wait for in-flight writes before reporting the worker as stopped.
    let _ = permits.acquire_many(concurrency as u32).await;

    info!("Click worker stopped");
}

async fn apply_event<M, G>(service: &ShorteningService<M, G>, event: ClickEvent)
where
    M: MappingRepository,
    G: CodeGenerator,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .map(jitter)
        .take(RETRY_ATTEMPTS - 1);

    let code = event.code.as_str();
    let at = event.visited_at;

    match Retry::spawn(strategy, move || service.record_visit_at(code, at)).await {
        Ok(true) => debug!(code, "Visit recorded"),
        // Deleted between resolve and count.
        Ok(false) => debug!(code, "Visit for missing code ignored"),
        Err(e) => {
            metrics::counter!("click_events_failed_total").increment(1);
            warn!(code, error = %e, "Failed to record visit");
        }
    }
}
