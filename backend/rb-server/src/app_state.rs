use crate::HubSet;

use rb_core::{MapRenderer, Robot};
use rb_stream::ShutdownCoordinator;

use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub robot: Arc<dyn Robot>,
    pub renderer: Arc<dyn MapRenderer>,
    pub hubs: HubSet,
    pub shutdown: ShutdownCoordinator,
}
