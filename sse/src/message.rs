use axum::response::sse::Event;
use domain::error::{Error, InternalErrorKind};
use domain::ArchiveEvent;

/// Converts an archive event into an SSE event.
///
/// Only the `data` field is set, so on the wire the frame is identical to the
/// one the buffered endpoint produces: `data: <json>\n\n`.
pub fn to_sse_event(event: &ArchiveEvent) -> Result<Event, Error> {
    let event_data = serde_json::to_string(event)
        .map_err(|e| Error::internal(InternalErrorKind::Serialization).with_source(e))?;

    Ok(Event::default().data(event_data))
}
