#![allow(dead_code)]

//! Test infrastructure for rb-server API tests

use rb_config::{ImageStreamConfig, StreamConfig};
use rb_core::{MockRobot, SvgMapRenderer};
use rb_server::{AppState, HubSet};
use rb_stream::ShutdownCoordinator;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use tower::ServiceExt;

pub const API_PREFIX: &str = "/api/v2/robot";

/// AppState backed by a mock robot, with `max_clients` per event stream
pub fn create_test_app_state(max_clients: usize) -> (AppState, MockRobot) {
    let robot = MockRobot::new();
    let streams = StreamConfig {
        max_clients,
        ..StreamConfig::default()
    };

    let state = AppState {
        robot: Arc::new(robot.clone()),
        renderer: Arc::new(SvgMapRenderer::new()),
        hubs: HubSet::new(&streams, &ImageStreamConfig::default()),
        shutdown: ShutdownCoordinator::new(),
    };

    (state, robot)
}

pub fn router(state: &AppState) -> Router {
    rb_server::build_router(state.clone(), API_PREFIX)
}

/// Send a GET for `path` under the API prefix
pub async fn get(state: &AppState, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(format!("{API_PREFIX}{path}"))
        .body(Body::empty())
        .unwrap();

    router(state).oneshot(request).await.unwrap()
}
