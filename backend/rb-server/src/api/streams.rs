//! Long-lived streaming handlers.
//!
//! The subscriber slot is taken before any response is produced, so a
//! rejected client only ever sees a plain error status.

use crate::{ApiResult, AppState};

use rb_stream::{
    BroadcastHub, EventStreamSession, ImageStreamSession, event_stream_response,
    image_stream_response,
};

use axum::{extract::State, response::Response};

/// GET /state/sse
pub async fn state_events(State(state): State<AppState>) -> ApiResult<Response> {
    open_event_stream(&state.hubs.state)
}

/// GET /state/attributes/sse
pub async fn attributes_events(State(state): State<AppState>) -> ApiResult<Response> {
    open_event_stream(&state.hubs.attributes)
}

/// GET /state/map/sse
pub async fn map_events(State(state): State<AppState>) -> ApiResult<Response> {
    open_event_stream(&state.hubs.map)
}

/// GET /state/map.msvg
///
/// Polls and renders once for the first frame, then registers for pushes.
pub async fn map_image_stream(State(state): State<AppState>) -> ApiResult<Response> {
    let snapshot = state.robot.poll_state().await?;
    let image = state.renderer.render(&snapshot.map)?;

    let registry = &state.hubs.map_image;
    let subscription = registry.subscribe()?;
    let session = ImageStreamSession::new(subscription, registry.framer(), &image);

    Ok(image_stream_response(session, registry.framer().content_type()))
}

fn open_event_stream(hub: &BroadcastHub) -> ApiResult<Response> {
    let subscription = hub.subscribe()?;
    let session = EventStreamSession::new(subscription, hub.config().keep_alive_interval);

    Ok(event_stream_response(session))
}
