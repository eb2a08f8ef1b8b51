use crate::Result;

use bytes::Bytes;
use serde_json::Value;

/// Turns a map snapshot into an image
pub trait MapRenderer: Send + Sync {
    fn render(&self, map: &Value) -> Result<Bytes>;

    fn content_type(&self) -> &'static str;
}
