use crate::{Result, RobotEvent, RobotInfo, RobotState};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

/// Boundary to the device whose status is exposed over HTTP.
#[async_trait]
pub trait Robot: Send + Sync {
    fn info(&self) -> RobotInfo;

    fn properties(&self) -> Value;

    /// Names of the capabilities this robot supports
    fn capabilities(&self) -> Vec<String>;

    /// Ask the device for a fresh snapshot.
    async fn poll_state(&self) -> Result<RobotState>;

    /// Last known snapshot, without talking to the device.
    fn state(&self) -> RobotState;

    /// Receiver for change notifications.
    fn subscribe_events(&self) -> broadcast::Receiver<RobotEvent>;
}
