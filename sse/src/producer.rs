use domain::{ArchiveEvent, ArchiveParser};
use log::*;
use tokio::sync::mpsc::{self, Receiver};
use tokio::task::JoinHandle;

/// Events a producer may queue ahead of a slow consumer before it waits.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Unique identifier for one archive run (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// How a producer task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every event, completion included, was handed to the consumer.
    Completed { total: usize },
    /// The consumer went away after `delivered` events.
    Cancelled { delivered: usize },
}

/// Starts one archive run on its own task.
///
/// Events are delivered through the returned receiver as they are produced,
/// with the parser's step delay between two progress events. Dropping the
/// receiver cancels the run at its next send.
pub fn spawn_archive_run(
    parser: ArchiveParser,
) -> (RunId, Receiver<ArchiveEvent>, JoinHandle<RunOutcome>) {
    let run_id = RunId::new();
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

    let task_run_id = run_id.clone();
    let handle = tokio::spawn(async move {
        info!("Archive run {} started", task_run_id.as_str());
        let step_delay = parser.step_delay();
        let mut delivered = 0;

        for event in parser.events() {
            let is_progress = !event.is_complete();

            if tx.send(event).await.is_err() {
                warn!(
                    "Archive run {} cancelled by consumer after {} events",
                    task_run_id.as_str(),
                    delivered
                );
                return RunOutcome::Cancelled { delivered };
            }
            delivered += 1;
            trace!("Archive run {} delivered event {}", task_run_id.as_str(), delivered);

            if is_progress && !step_delay.is_zero() {
                tokio::time::sleep(step_delay).await;
            }
        }

        info!(
            "Archive run {} completed, {} draws delivered",
            task_run_id.as_str(),
            parser.total()
        );
        RunOutcome::Completed {
            total: parser.total(),
        }
    });

    (run_id, rx, handle)
}

/// Awaits a producer task and logs how it ended.
///
/// Returns `None` when the producer panicked or was aborted.
pub fn watch_run(
    run_id: RunId,
    handle: JoinHandle<RunOutcome>,
) -> JoinHandle<Option<RunOutcome>> {
    tokio::spawn(async move {
        match handle.await {
            Ok(outcome) => {
                match &outcome {
                    RunOutcome::Completed { total } => {
                        debug!("Archive run {} finished with {} draws", run_id.as_str(), total)
                    }
                    RunOutcome::Cancelled { delivered } => debug!(
                        "Archive run {} stopped after {} events",
                        run_id.as_str(),
                        delivered
                    ),
                }
                Some(outcome)
            }
            Err(e) => {
                error!("Archive run {} failed: {e}", run_id.as_str());
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CompletionEvent, TOTAL_DRAWS};
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_delivers_every_event_in_order() {
        let parser = ArchiveParser::new(Duration::ZERO);
        let expected: Vec<ArchiveEvent> = parser.events().collect();

        let (_run_id, mut rx, handle) = spawn_archive_run(parser);
        let mut received = Vec::new();
        while let Some(event) = rx.recv().await {
            received.push(event);
        }

        assert_eq!(received, expected);
        assert_eq!(
            received.last(),
            Some(&ArchiveEvent::Complete(CompletionEvent::new(TOTAL_DRAWS)))
        );
        assert_eq!(
            handle.await.unwrap(),
            RunOutcome::Completed { total: TOTAL_DRAWS }
        );
    }

    #[tokio::test]
    async fn test_dropping_receiver_cancels_run() {
        let (_run_id, mut rx, handle) = spawn_archive_run(ArchiveParser::new(Duration::ZERO));

        for _ in 0..3 {
            assert!(rx.recv().await.is_some());
        }
        drop(rx);

        match handle.await.unwrap() {
            RunOutcome::Cancelled { delivered } => {
                assert!(delivered >= 3);
                assert!(delivered <= 3 + EVENT_CHANNEL_CAPACITY);
            }
            outcome => panic!("expected a cancelled run, got {outcome:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_delay_paces_progress_events() {
        let (_run_id, mut rx, handle) =
            spawn_archive_run(ArchiveParser::new(Duration::from_millis(50)));

        let started = tokio::time::Instant::now();
        let mut count = 0;
        while rx.recv().await.is_some() {
            count += 1;
        }

        assert_eq!(count, TOTAL_DRAWS + 1);
        assert!(started.elapsed() >= Duration::from_millis(50) * (TOTAL_DRAWS as u32 - 1));
        assert!(matches!(handle.await.unwrap(), RunOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn test_watch_run_reports_completed_outcome() {
        let (run_id, mut rx, handle) = spawn_archive_run(ArchiveParser::new(Duration::ZERO));
        let watcher = watch_run(run_id, handle);

        while rx.recv().await.is_some() {}

        assert_eq!(
            watcher.await.unwrap(),
            Some(RunOutcome::Completed { total: TOTAL_DRAWS })
        );
    }

    #[tokio::test]
    async fn test_watch_run_reports_cancelled_outcome() {
        let (run_id, rx, handle) = spawn_archive_run(ArchiveParser::new(Duration::ZERO));
        let watcher = watch_run(run_id, handle);
        drop(rx);

        assert!(matches!(
            watcher.await.unwrap(),
            Some(RunOutcome::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn test_watch_run_reports_failed_producer() {
        let handle: JoinHandle<RunOutcome> = tokio::spawn(async { panic!("producer failed") });
        let watcher = watch_run(RunId::new(), handle);

        assert_eq!(watcher.await.unwrap(), None);
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }
}
