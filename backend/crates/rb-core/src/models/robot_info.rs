use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static identification of the robot implementation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RobotInfo {
    pub manufacturer: String,
    pub model_name: String,
    pub model_details: Value,
    pub implementation: String,
}
