use crate::{Result, RobotError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of everything the robot currently reports.
///
/// Fields other than `attributes` and `map` are carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RobotState {
    #[serde(default)]
    pub attributes: Vec<Value>,
    #[serde(default)]
    pub map: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RobotState {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| RobotError::serialize("state", e))
    }

    pub fn attributes_json(&self) -> Result<String> {
        serde_json::to_string(&self.attributes).map_err(|e| RobotError::serialize("attributes", e))
    }

    pub fn map_json(&self) -> Result<String> {
        serde_json::to_string(&self.map).map_err(|e| RobotError::serialize("map", e))
    }
}
