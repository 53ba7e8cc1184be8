//! Background worker applying click counter increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Retries after the first failed attempt.
const MAX_RETRIES: usize = 5;

/// Events being retried at once; beyond this the worker waits for one to finish.
const MAX_PENDING_RETRIES: usize = 1024;

/// Consumes click events until every sender is dropped.
///
/// The first attempt for each event runs inline. A failed event moves to a
/// background task that retries with jittered exponential backoff, so one bad
/// increment never holds up the events queued behind it. An event that still
/// fails after [`MAX_RETRIES`] retries is logged and dropped.
///
/// Pending retries are awaited before the worker returns.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    link_repository: Arc<dyn LinkRepository>,
) {
    let mut retries = JoinSet::new();

    while let Some(event) = rx.recv().await {
        while retries.try_join_next().is_some() {}

        match link_repository.increment_clicks(event.link_id).await {
            Err(e) => {
                tracing::debug!(code = %event.code, error = %e, "Click increment failed, retrying");

                if retries.len() >= MAX_PENDING_RETRIES {
                    retries.join_next().await;
                }
                retries.spawn(retry_increment(link_repository.clone(), event));
            }
            result => log_outcome(&event, result),
        }
    }

    while retries.join_next().await.is_some() {}

    tracing::info!("Click worker stopped");
}

async fn retry_increment(link_repository: Arc<dyn LinkRepository>, event: ClickEvent) {
    // 10ms, 20ms, 40ms, ... capped at 2s
    let mut strategy = ExponentialBackoff::from_millis(2)
        .factor(5)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(MAX_RETRIES);

    // The inline attempt already failed; wait before the first retry.
    if let Some(delay) = strategy.next() {
        tokio::time::sleep(delay).await;
    }

    let result = Retry::spawn(strategy, || {
        link_repository.increment_clicks(event.link_id)
    })
    .await;

    log_outcome(&event, result);
}

fn log_outcome(event: &ClickEvent, result: Result<bool, AppError>) {
    match result {
        Ok(true) => tracing::debug!(code = %event.code, "Click counted"),
        Ok(false) => {
            tracing::warn!(code = %event.code, link_id = event.link_id, "Clicked link no longer exists")
        }
        Err(e) => tracing::error!(
            code = %event.code,
            link_id = event.link_id,
            error = %e,
            "Failed to count click after retries"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use mockall::Sequence;
    use serde_json::json;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_clicks()
            .withf(|id| *id == 3)
            .times(2)
            .returning(|_| Ok(true));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new(3, "aaaaaa")).await.unwrap();
        tx.send(ClickEvent::new(3, "aaaaaa")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failure() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();
        repo.expect_increment_clicks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        repo.expect_increment_clicks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new(1, "bbbbbb")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_max_retries() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_clicks()
            .times(MAX_RETRIES + 1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new(1, "cccccc")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }

    #[tokio::test]
    async fn test_failing_event_does_not_hold_up_later_events() {
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut repo = MockLinkRepository::new();
        let log = calls.clone();
        repo.expect_increment_clicks()
            .withf(|id| *id == 1)
            .times(MAX_RETRIES + 1)
            .returning(move |id| {
                log.lock().unwrap().push(id);
                Err(AppError::internal("Database error", json!({})))
            });
        let log = calls.clone();
        repo.expect_increment_clicks()
            .withf(|id| *id == 2)
            .times(1)
            .returning(move |id| {
                log.lock().unwrap().push(id);
                Ok(true)
            });

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new(1, "dddddd")).await.unwrap();
        tx.send(ClickEvent::new(2, "eeeeee")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), MAX_RETRIES + 2);
        assert_eq!(calls[0], 1);
        assert_eq!(calls[1], 2, "second event waited for retries: {calls:?}");
    }
}
