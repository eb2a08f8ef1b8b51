use crate::framing::sse;
use crate::{EventStreamSession, ImageStreamSession};

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Streaming `text/event-stream` response for an accepted subscriber
pub fn event_stream_response(session: EventStreamSession) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, sse::CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
            (header::HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        Body::from_stream(session.into_stream()),
    )
        .into_response()
}

/// Streaming multipart response; `content_type` carries the boundary
pub fn image_stream_response(session: ImageStreamSession, content_type: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        Body::from_stream(session.into_stream()),
    )
        .into_response()
}
