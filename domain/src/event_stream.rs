//! Text framing of archive events as `data: <json>\n\n` units.
//!
//! The encoder is used by the buffered endpoint, which concatenates frames
//! into a single body. The decoder is used by consumers that read a body in
//! arbitrary chunks and want complete events as soon as they arrive.

use crate::error::{Error, ExternalErrorKind, InternalErrorKind};
use crate::events::ArchiveEvent;
use log::*;

/// Prefix of every line carrying event payload.
pub const DATA_PREFIX: &str = "data:";

// A blank line ends a frame; servers may use either line ending.
const FRAME_TERMINATORS: [&[u8]; 2] = [b"\n\n", b"\r\n\r\n"];

/// Encodes one event as a complete frame, blank line included.
pub fn encode_frame(event: &ArchiveEvent) -> Result<String, Error> {
    let json = serde_json::to_string(event)
        .map_err(|e| Error::internal(InternalErrorKind::Serialization).with_source(e))?;
    Ok(format!("{DATA_PREFIX} {json}\n\n"))
}

/// Incremental decoder for a frame stream.
///
/// Bytes may be pushed in chunks of any size. A frame is only parsed once its
/// terminating blank line has been seen; the remainder stays buffered.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns every event completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<ArchiveEvent>, Error> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some((end, terminator_len)) = find_terminator(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + terminator_len).collect();
            if let Some(event) = parse_frame(&frame[..end])? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Flushes a trailing frame that was not followed by a blank line.
    pub fn finish(mut self) -> Result<Option<ArchiveEvent>, Error> {
        let rest = std::mem::take(&mut self.buffer);
        if rest.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        warn!("Event stream ended without a terminating blank line");
        parse_frame(&rest)
    }
}

/// Decodes a complete body into its events.
pub fn decode_stream(body: &str) -> Result<Vec<ArchiveEvent>, Error> {
    let mut decoder = FrameDecoder::new();
    let mut events = decoder.push(body.as_bytes())?;
    if let Some(last) = decoder.finish()? {
        events.push(last);
    }
    Ok(events)
}

// Earliest blank line in `buffer` as (offset, terminator length).
fn find_terminator(buffer: &[u8]) -> Option<(usize, usize)> {
    FRAME_TERMINATORS
        .iter()
        .filter_map(|terminator| {
            buffer
                .windows(terminator.len())
                .position(|window| window == *terminator)
                .map(|position| (position, terminator.len()))
        })
        .min()
}

// Comment lines (keep-alives) and frames without data produce no event.
fn parse_frame(frame: &[u8]) -> Result<Option<ArchiveEvent>, Error> {
    let text = std::str::from_utf8(frame)
        .map_err(|e| Error::external(ExternalErrorKind::MalformedEventStream).with_source(e))?;

    let data: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter_map(|line| line.strip_prefix(DATA_PREFIX))
        .map(|value| value.strip_prefix(' ').unwrap_or(value))
        .collect();

    if data.is_empty() {
        trace!("Skipping frame without data: {text:?}");
        return Ok(None);
    }

    serde_json::from_str(&data.join("\n"))
        .map(Some)
        .map_err(|e| Error::external(ExternalErrorKind::MalformedEventStream).with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::draw_for_step;
    use crate::error::DomainErrorKind;
    use crate::events::{CompletionEvent, ProgressEvent};

    fn sample_events() -> Vec<ArchiveEvent> {
        vec![
            ArchiveEvent::Progress(ProgressEvent {
                progress: 50,
                result: draw_for_step(0),
            }),
            ArchiveEvent::Progress(ProgressEvent {
                progress: 100,
                result: draw_for_step(7),
            }),
            ArchiveEvent::Complete(CompletionEvent::new(2)),
        ]
    }

    #[test]
    fn test_encode_frame_format() {
        let frame = encode_frame(&ArchiveEvent::Complete(CompletionEvent::new(100))).unwrap();
        assert_eq!(frame, "data: {\"complete\":true,\"total\":100}\n\n");
    }

    #[test]
    fn test_decoder_handles_frames_split_across_chunks() {
        let body: String = sample_events()
            .iter()
            .map(|event| encode_frame(event).unwrap())
            .collect();

        let mut decoder = FrameDecoder::new();
        let mut decoded = Vec::new();
        for chunk in body.as_bytes().chunks(7) {
            decoded.extend(decoder.push(chunk).unwrap());
        }

        assert_eq!(decoded, sample_events());
        assert!(decoder.finish().unwrap().is_none());
    }

    #[test]
    fn test_decoder_skips_keep_alive_comments() {
        let body = format!(
            ":\n\n{}",
            encode_frame(&ArchiveEvent::Complete(CompletionEvent::new(1))).unwrap()
        );
        let events = decode_stream(&body).unwrap();
        assert_eq!(events, vec![ArchiveEvent::Complete(CompletionEvent::new(1))]);
    }

    #[test]
    fn test_decode_stream_flushes_unterminated_frame() {
        let events = decode_stream("data: {\"complete\":true,\"total\":4}").unwrap();
        assert_eq!(events, vec![ArchiveEvent::Complete(CompletionEvent::new(4))]);
    }

    #[test]
    fn test_decoder_accepts_crlf_frame_terminators() {
        let body = "data: {\"complete\":true,\"total\":1}\r\n\r\ndata: {\"complete\":true,\"total\":2}\r\n\r\n";
        let events = decode_stream(body).unwrap();
        assert_eq!(
            events,
            vec![
                ArchiveEvent::Complete(CompletionEvent::new(1)),
                ArchiveEvent::Complete(CompletionEvent::new(2)),
            ]
        );
    }

    #[test]
    fn test_decoder_handles_crlf_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder
            .push(b"data: {\"complete\":true,\"total\":3}\r\n")
            .unwrap()
            .is_empty());
        let events = decoder.push(b"\r\n").unwrap();
        assert_eq!(events, vec![ArchiveEvent::Complete(CompletionEvent::new(3))]);
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = decode_stream("data: {not json}\n\n").unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::MalformedEventStream)
        );
    }
}
