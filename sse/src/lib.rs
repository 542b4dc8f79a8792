//! Incremental Server-Sent Events delivery of archive runs.
//!
//! The buffered endpoint renders a whole run before answering. This crate
//! provides the streaming alternative: each run gets its own producer task
//! that pushes events into a bounded channel, and the web layer forwards
//! whatever arrives to the client as it arrives.
//!
//! # Message Flow
//!
//! 1. Client POSTs to `/parse-keno/stream`
//! 2. Handler calls [`spawn_archive_run`] and keeps the receiver
//! 3. Producer sends one event per step, sleeping the step delay in between
//! 4. Handler converts each event with [`message::to_sse_event`] and yields it
//! 5. Client disconnects early: the receiver is dropped, the producer's next
//!    send fails and the run ends as [`RunOutcome::Cancelled`]
//! 6. [`watch_run`] awaits the producer and logs its outcome, including a panic
//!
//! # Modules
//!
//! - `producer`: per-run producer task, `RunId` and `RunOutcome`
//! - `message`: conversion into axum SSE events

pub mod message;
pub mod producer;

pub use producer::{spawn_archive_run, watch_run, RunId, RunOutcome};
