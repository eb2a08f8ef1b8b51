use crate::ErrorLocation;

use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RobotError {
    /// The device could not produce a fresh state snapshot
    #[error("Failed to poll robot state: {message} {location}")]
    Poll {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to render map: {message} {location}")]
    Render {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize {what}: {source} {location}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl RobotError {
    #[track_caller]
    pub fn poll<S: Into<String>>(message: S) -> Self {
        Self::Poll {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn serialize(what: &'static str, source: serde_json::Error) -> Self {
        Self::Serialize {
            what,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, RobotError>;
