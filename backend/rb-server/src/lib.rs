pub mod api;
pub mod app_state;
pub mod error;
pub mod event_source;
pub mod health;
pub mod hubs;
pub mod listener;
pub mod logger;
pub mod routes;
pub mod serve;
pub mod simulator;

#[cfg(test)]
mod tests;

pub use api::error::{ApiError, Result as ApiResult};
pub use app_state::AppState;
pub use error::ServerError;
pub use hubs::{HubCounts, HubSet};
pub use listener::{ClosingListener, ConnectionCutter};
pub use serve::serve;

pub use crate::routes::build_router;
