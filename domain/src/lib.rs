//! Core of the Keno archive simulation.
//!
//! Everything here is synchronous and free of I/O: the draw records, the
//! events a run emits, the parser that produces them and the text framing
//! used to put them on the wire. The `sse` and `web` crates build the
//! transport on top.

pub mod draws;
pub mod error;
pub mod event_stream;
pub mod events;
pub mod parser;

pub use draws::DrawRecord;
pub use events::{ArchiveEvent, CompletionEvent, ProgressEvent};
pub use parser::{ArchiveEvents, ArchiveParser, TOTAL_DRAWS};
