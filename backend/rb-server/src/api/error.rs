//! HTTP error mapping for the robot routes.
//!
//! Snapshot failures answer with the upstream error text as plain text;
//! stream rejections keep the status chosen by `StreamError`.

use rb_core::RobotError;
use rb_stream::StreamError;

use std::panic::Location;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The robot could not produce a snapshot (500)
    #[error("Upstream poll failed: {message} {location}")]
    Upstream {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// Stream subscription refused (503)
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Stream(e) => e.into_response(),
            ApiError::Upstream { ref message, .. } | ApiError::Internal { ref message, .. } => {
                log::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone()).into_response()
            }
        }
    }
}

impl From<RobotError> for ApiError {
    #[track_caller]
    fn from(e: RobotError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            RobotError::Poll { message, .. } => ApiError::Upstream { message, location },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
