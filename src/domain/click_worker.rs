//! Background worker persisting click events.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

const RETRY_BASE_MS: u64 = 10;
const RETRY_ATTEMPTS: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// At most `concurrency` events are processed at once. Each event resolves its
/// short code, inserts a click row (retried with exponential backoff), then bumps
/// the link's `click_count`. Failures are logged and counted, never propagated:
/// the redirect has already been served.
///
/// Pending tasks are awaited before the function returns.
pub async fn run_click_worker<L, C>(
    mut rx: mpsc::Receiver<ClickEvent>,
    links: Arc<L>,
    clicks: Arc<C>,
    concurrency: usize,
) where
    L: LinkRepository + 'static,
    C: ClickRepository + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let links = links.clone();
        let clicks = clicks.clone();
        tasks.spawn(async move {
            let _permit = permit;
            let code = event.code.clone();
            match process_click(event, links.as_ref(), clicks.as_ref()).await {
                Ok(()) => metrics::counter!("clicks_recorded_total").increment(1),
                Err(e) => {
                    metrics::counter!("clicks_failed_total").increment(1);
                    warn!(code = %code, error = %e, "Failed to record click");
                }
            }
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}
    info!("Click worker stopped");
}

async fn process_click<L, C>(event: ClickEvent, links: &L, clicks: &C) -> Result<(), AppError>
where
    L: LinkRepository,
    C: ClickRepository,
{
    let Some(link) = links.find_by_code(&event.code).await? else {
        debug!(code = %event.code, "Click for unknown code skipped");
        return Ok(());
    };

    let new_click = NewClick {
        url_id: link.id,
        clicked_at: event.clicked_at,
    };

    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MS)
        .map(jitter)
        .take(RETRY_ATTEMPTS);

    Retry::start(strategy, move || clicks.record_click(new_click.clone())).await?;

    links.increment_click_count(link.id).await
}
