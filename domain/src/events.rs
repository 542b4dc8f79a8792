use crate::draws::DrawRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reports that one more step of a run finished, along with the record it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProgressEvent {
    /// Percentage of the run completed, `1..=100`.
    pub progress: u8,
    pub result: DrawRecord,
}

/// Terminal marker sent once after the last progress event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompletionEvent {
    /// Always `true`.
    pub complete: bool,
    /// Number of steps the run processed.
    pub total: usize,
}

impl CompletionEvent {
    pub fn new(total: usize) -> Self {
        Self {
            complete: true,
            total,
        }
    }
}

/// Anything a run emits. Serialized without a tag, so each frame carries either
/// `{progress, result}` or `{complete, total}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArchiveEvent {
    Progress(ProgressEvent),
    Complete(CompletionEvent),
}

impl ArchiveEvent {
    pub fn is_complete(&self) -> bool {
        matches!(self, ArchiveEvent::Complete(_))
    }
}

/// Integer percentage reached after `step` (zero based) of `total` steps.
///
/// Exact integer floor: step 28 of 100 reports 29. A float `(i+1)/total*100`
/// truncates to 28 there, which repeats values instead of advancing.
pub fn progress_for_step(step: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (((step + 1) * 100) / total).min(100) as u8
}
