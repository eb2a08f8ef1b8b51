use std::panic::Location;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Too many subscribers on {hub}: {current} connected (max: {max}) {location}")]
    CapacityExceeded {
        hub: String,
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("{hub} is shut down {location}")]
    HubClosed {
        hub: String,
        location: ErrorLocation,
    },
}

impl StreamError {
    #[track_caller]
    pub fn capacity_exceeded(hub: &str, current: usize, max: usize) -> Self {
        Self::CapacityExceeded {
            hub: hub.to_string(),
            current,
            max,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn hub_closed(hub: &str) -> Self {
        Self::HubClosed {
            hub: hub.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CapacityExceeded { .. } | Self::HubClosed { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

impl IntoResponse for StreamError {
    fn into_response(self) -> Response {
        log::warn!("{}", self);

        let body = match &self {
            Self::CapacityExceeded { .. } => "Too many subscribers",
            Self::HubClosed { .. } => "Server is shutting down",
        };

        (self.status_code(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
