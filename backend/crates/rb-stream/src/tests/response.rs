use crate::{
    BroadcastHub, EventStreamSession, HubConfig, ImageStreamRegistry, ImageStreamSession,
    MultipartFramer, StreamError, event_stream_response, image_stream_response,
};

use std::time::Duration;

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use http_body_util::BodyExt;

#[tokio::test]
async fn given_session_when_event_stream_response_then_streaming_headers_and_frames() {
    let hub = BroadcastHub::new(HubConfig::new("State"));
    let session = EventStreamSession::new(hub.subscribe().unwrap(), Duration::from_secs(5));

    let response = event_stream_response(session);
    hub.publish("StateUpdated", "{}");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");

    let mut body = response.into_body();
    let frame = body.frame().await.unwrap().unwrap().into_data().unwrap();
    assert_eq!(&frame[..], b"event: StateUpdated\ndata: {}\n\n");

    hub.publish("StateUpdated", "late");
    hub.shutdown();

    let rest = body.collect().await.unwrap().to_bytes();
    assert!(rest.is_empty());
}

#[tokio::test]
async fn given_image_session_when_response_then_multipart_content_type() {
    let registry = ImageStreamRegistry::new("Map image", MultipartFramer::default(), None, 4);
    let framer = registry.framer().clone();
    let session = ImageStreamSession::new(registry.subscribe().unwrap(), &framer, b"<svg/>");

    let response = image_stream_response(session, framer.content_type());

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "multipart/x-mixed-replace; boundary=\"]]>?><%\""
    );

    let mut body = response.into_body();
    let preamble = body.frame().await.unwrap().unwrap().into_data().unwrap();
    let first = body.frame().await.unwrap().unwrap().into_data().unwrap();
    assert_eq!(preamble, framer.preamble());
    assert_eq!(first, framer.frame(b"<svg/>"));

    registry.shutdown();

    let rest = body.collect().await.unwrap().to_bytes();
    assert!(rest.is_empty());
}

#[tokio::test]
async fn given_registry_shut_down_before_body_polled_when_collected_then_nothing_written() {
    let registry = ImageStreamRegistry::new("Map image", MultipartFramer::default(), None, 4);
    let framer = registry.framer().clone();
    let session = ImageStreamSession::new(registry.subscribe().unwrap(), &framer, b"<svg/>");
    let response = image_stream_response(session, framer.content_type());

    registry.shutdown();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[test]
fn given_capacity_exceeded_when_into_response_then_service_unavailable() {
    let response = StreamError::capacity_exceeded("State", 5, 5).into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn given_hub_closed_when_into_response_then_service_unavailable() {
    let response = StreamError::hub_closed("State").into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
