use crate::draws::draw_for_step;
use crate::error::Error;
use crate::event_stream::encode_frame;
use crate::events::{progress_for_step, ArchiveEvent, CompletionEvent, ProgressEvent};
use log::*;
use std::thread;
use std::time::{Duration, Instant};

/// Number of steps in every archive run.
pub const TOTAL_DRAWS: usize = 100;

/// Simulated archive parser. Walks a fixed number of steps, yielding one draw per step.
#[derive(Debug, Clone)]
pub struct ArchiveParser {
    total: usize,
    step_delay: Duration,
}

impl ArchiveParser {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            total: TOTAL_DRAWS,
            step_delay,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Simulated latency between two steps.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// The events of one run, without any delay: `total` progress events then one completion.
    pub fn events(&self) -> ArchiveEvents {
        ArchiveEvents {
            step: 0,
            total: self.total,
            finished: false,
        }
    }

    /// Runs the whole simulation on the calling thread and returns the concatenated frames.
    ///
    /// Blocks for roughly `total * step_delay`.
    pub fn run_buffered(&self) -> Result<String, Error> {
        let started = Instant::now();
        let mut body = String::new();

        for event in self.events() {
            body.push_str(&encode_frame(&event)?);

            if let ArchiveEvent::Progress(progress) = &event {
                trace!(
                    "Draw {} processed ({}%)",
                    progress.result.draw_number,
                    progress.progress
                );
                if !self.step_delay.is_zero() {
                    thread::sleep(self.step_delay);
                }
            }
        }

        info!(
            "Archive run of {} draws finished in {:?}",
            self.total,
            started.elapsed()
        );
        Ok(body)
    }
}

impl Default for ArchiveParser {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

/// Iterator over the events of one run.
#[derive(Debug, Clone)]
pub struct ArchiveEvents {
    step: usize,
    total: usize,
    finished: bool,
}

impl Iterator for ArchiveEvents {
    type Item = ArchiveEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.step < self.total {
            let event = ArchiveEvent::Progress(ProgressEvent {
                progress: progress_for_step(self.step, self.total),
                result: draw_for_step(self.step),
            });
            self.step += 1;
            return Some(event);
        }

        self.finished = true;
        Some(ArchiveEvent::Complete(CompletionEvent::new(self.total)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished {
            0
        } else {
            self.total - self.step + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArchiveEvents {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::{draw_for_step, NUMBERS_PER_DRAW};
    use crate::event_stream::decode_stream;

    fn progress_events(events: &[ArchiveEvent]) -> Vec<&ProgressEvent> {
        events
            .iter()
            .filter_map(|event| match event {
                ArchiveEvent::Progress(progress) => Some(progress),
                ArchiveEvent::Complete(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_run_emits_progress_then_single_completion() {
        let events: Vec<ArchiveEvent> = ArchiveParser::new(Duration::ZERO).events().collect();

        assert_eq!(events.len(), TOTAL_DRAWS + 1);
        assert!(events[..TOTAL_DRAWS].iter().all(|e| !e.is_complete()));
        assert_eq!(
            events.last(),
            Some(&ArchiveEvent::Complete(CompletionEvent::new(100)))
        );
    }

    #[test]
    fn test_progress_is_non_decreasing_and_ends_at_100() {
        let events: Vec<ArchiveEvent> = ArchiveParser::new(Duration::ZERO).events().collect();
        let progress = progress_events(&events);

        assert!(progress.windows(2).all(|p| p[0].progress <= p[1].progress));
        assert_eq!(progress.first().map(|p| p.progress), Some(1));
        assert_eq!(progress.last().map(|p| p.progress), Some(100));
    }

    #[test]
    fn test_results_follow_step_order() {
        let events: Vec<ArchiveEvent> = ArchiveParser::new(Duration::ZERO).events().collect();
        let progress = progress_events(&events);

        for (step, event) in progress.iter().enumerate().take(5) {
            assert_eq!(event.result, draw_for_step(step));
        }
        assert_eq!(progress[5].result.draw_number, 3_146_995);
        assert_eq!(progress[5].result.numbers.len(), NUMBERS_PER_DRAW);
    }

    #[test]
    fn test_size_hint_counts_remaining_events() {
        let mut events = ArchiveParser::new(Duration::ZERO).events();
        assert_eq!(events.len(), 101);
        events.next();
        assert_eq!(events.len(), 100);
        let rest: Vec<_> = events.by_ref().collect();
        assert_eq!(rest.len(), 100);
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn test_buffered_run_decodes_to_same_events() {
        let parser = ArchiveParser::new(Duration::ZERO);
        let body = parser.run_buffered().unwrap();

        assert!(body.starts_with("data: {\"progress\":1,\"result\":{\"drawNumber\":3147000"));
        assert!(body.ends_with("data: {\"complete\":true,\"total\":100}\n\n"));

        let decoded = decode_stream(&body).unwrap();
        let expected: Vec<ArchiveEvent> = parser.events().collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_two_runs_are_identical() {
        let parser = ArchiveParser::new(Duration::ZERO);
        assert_eq!(parser.run_buffered().unwrap(), parser.run_buffered().unwrap());
    }
}
