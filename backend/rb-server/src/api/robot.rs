//! Robot REST API handlers
//!
//! Static descriptors plus snapshot endpoints that poll the robot first.

use crate::{ApiResult, AppState};

use rb_core::RobotInfo;

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// GET /
pub async fn get_robot(State(state): State<AppState>) -> Json<RobotInfo> {
    Json(state.robot.info())
}

/// GET /properties
pub async fn get_properties(State(state): State<AppState>) -> Json<Value> {
    Json(state.robot.properties())
}

/// GET /capabilities
pub async fn get_capabilities(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.robot.capabilities())
}

/// GET /state
pub async fn get_state(State(state): State<AppState>) -> ApiResult<Response> {
    let snapshot = state.robot.poll_state().await?;
    Ok(Json(snapshot).into_response())
}

/// GET /state/attributes
pub async fn get_attributes(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let snapshot = state.robot.poll_state().await?;
    Ok(Json(snapshot.attributes))
}

/// GET /state/map
pub async fn get_map(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let snapshot = state.robot.poll_state().await?;
    Ok(Json(snapshot.map))
}

/// GET /state/map.svg
pub async fn get_map_image(State(state): State<AppState>) -> ApiResult<Response> {
    let snapshot = state.robot.poll_state().await?;
    let image = state.renderer.render(&snapshot.map)?;

    Ok(([(header::CONTENT_TYPE, state.renderer.content_type())], image).into_response())
}
