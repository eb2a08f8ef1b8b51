use bytes::Bytes;

/// A named event fanned out to every subscriber of a hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub event_name: String,
    /// Serialized payload, shared between subscribers
    pub payload: Bytes,
}

impl StreamEvent {
    pub fn new(event_name: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            event_name: event_name.into(),
            payload: payload.into(),
        }
    }
}
