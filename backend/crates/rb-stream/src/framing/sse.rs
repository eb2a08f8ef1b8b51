//! `text/event-stream` framing.

use crate::StreamEvent;

use bytes::{BufMut, Bytes, BytesMut};

pub const CONTENT_TYPE: &str = "text/event-stream";

/// Comment frame; clients ignore it, intermediaries see traffic
pub const KEEP_ALIVE_FRAME: &[u8] = b":\n\n";

/// Encode one event as an `event:` line, one `data:` line per payload
/// line, and the terminating blank line.
pub fn encode_event(event: &StreamEvent) -> Bytes {
    let mut frame = BytesMut::with_capacity(event.event_name.len() + event.payload.len() + 16);

    frame.put_slice(b"event: ");
    for byte in event.event_name.bytes().filter(|b| *b != b'\n' && *b != b'\r') {
        frame.put_u8(byte);
    }
    frame.put_u8(b'\n');

    for line in event.payload.split(|b| *b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        frame.put_slice(b"data: ");
        frame.put_slice(line);
        frame.put_u8(b'\n');
    }

    frame.put_u8(b'\n');
    frame.freeze()
}
