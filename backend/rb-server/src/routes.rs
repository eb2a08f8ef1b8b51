use crate::{AppState, health};
use crate::api::{robot, streams};

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router; robot routes are mounted under `api_prefix`
pub fn build_router(state: AppState, api_prefix: &str) -> Router {
    let robot_routes = Router::new()
        .route("/", get(robot::get_robot))
        .route("/properties", get(robot::get_properties))
        .route("/capabilities", get(robot::get_capabilities))
        .route("/state", get(robot::get_state))
        .route("/state/attributes", get(robot::get_attributes))
        .route("/state/map", get(robot::get_map))
        .route("/state/map.svg", get(robot::get_map_image))
        // Streaming endpoints
        .route("/state/map.msvg", get(streams::map_image_stream))
        .route("/state/sse", get(streams::state_events))
        .route("/state/attributes/sse", get(streams::attributes_events))
        .route("/state/map/sse", get(streams::map_events));

    Router::new()
        .nest(api_prefix, robot_routes)
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
