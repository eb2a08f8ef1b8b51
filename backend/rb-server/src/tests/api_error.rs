use crate::ApiError;

use rb_core::RobotError;
use rb_stream::StreamError;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;

#[tokio::test]
async fn given_poll_failure_when_into_response_then_500_with_error_text() {
    let error = ApiError::from(RobotError::poll("vacuum unreachable"));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"vacuum unreachable");
}

#[tokio::test]
async fn given_render_failure_when_into_response_then_500() {
    let error = ApiError::from(RobotError::render("map has no pixelSize"));

    assert!(matches!(error, ApiError::Internal { .. }));
    assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn given_capacity_exceeded_when_into_response_then_503_with_text() {
    let error = ApiError::from(StreamError::capacity_exceeded("state", 5, 5));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Too many subscribers");
}
