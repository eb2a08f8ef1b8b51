use crate::{Result, Robot, RobotError, RobotEvent, RobotInfo, RobotState};

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use log::debug;
use rand::Rng;
use serde_json::{Value, json};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;
const MAP_SIZE: u64 = 5000;
const PIXEL_SIZE: u64 = 5;

/// In-memory robot used when no real device is attached
#[derive(Clone)]
pub struct MockRobot {
    inner: Arc<RwLock<MockInner>>,
    events: broadcast::Sender<RobotEvent>,
}

struct MockInner {
    state: RobotState,
    poll_failure: Option<String>,
}

impl MockRobot {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(MockInner {
                state: Self::initial_state(),
                poll_failure: None,
            })),
            events,
        }
    }

    /// Make subsequent `poll_state` calls fail with `message`, or succeed again with `None`.
    pub fn set_poll_failure(&self, message: Option<String>) {
        self.write().poll_failure = message;
    }

    pub fn set_attributes(&self, attributes: Vec<Value>) {
        self.write().state.attributes = attributes;
        self.emit(RobotEvent::StateAttributesUpdated);
        self.emit(RobotEvent::StateUpdated);
    }

    pub fn set_map(&self, map: Value) {
        self.write().state.map = map;
        self.emit(RobotEvent::MapUpdated);
        self.emit(RobotEvent::StateUpdated);
    }

    /// Drain the battery a little and move the robot to a random spot on the floor.
    pub fn simulate_step(&self) {
        let mut rng = rand::rng();
        let offset_x: i64 = rng.random_range(-50..=50);
        let offset_y: i64 = rng.random_range(-50..=50);

        let attributes = {
            let inner = self.read();
            inner
                .state
                .attributes
                .iter()
                .cloned()
                .map(|mut attribute| {
                    if attribute["__class"] == "BatteryStateAttribute" {
                        let level = attribute["level"].as_u64().unwrap_or(100);
                        attribute["level"] = json!(if level == 0 { 100 } else { level - 1 });
                    }
                    attribute
                })
                .collect::<Vec<_>>()
        };
        self.set_attributes(attributes);

        let mut map = self.read().state.map.clone();
        if let Some(entities) = map
            .as_object_mut()
            .and_then(|map| map.get_mut("entities"))
            .and_then(Value::as_array_mut)
        {
            for entity in entities.iter_mut() {
                if entity["type"] == "robot_position" {
                    let center = (MAP_SIZE / 2) as i64;
                    entity["points"] = json!([center + offset_x, center + offset_y]);
                }
            }
        }
        self.set_map(map);
    }

    fn emit(&self, event: RobotEvent) {
        // No receivers is fine: nobody is streaming yet
        if self.events.send(event).is_err() {
            debug!("No listeners for {event}");
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MockInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MockInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn initial_state() -> RobotState {
        let center = MAP_SIZE / PIXEL_SIZE / 2;
        RobotState {
            attributes: vec![
                json!({
                    "__class": "StatusStateAttribute",
                    "value": "docked",
                    "flag": "none"
                }),
                json!({
                    "__class": "BatteryStateAttribute",
                    "level": 100,
                    "flag": "charging"
                }),
            ],
            map: json!({
                "__class": "ValetudoMap",
                "size": { "x": MAP_SIZE, "y": MAP_SIZE },
                "pixelSize": PIXEL_SIZE,
                "layers": [
                    {
                        "__class": "MapLayer",
                        "type": "floor",
                        "compressedPixels": [
                            center - 20, center - 20, 40,
                            center - 19, center - 19, 38
                        ]
                    },
                    {
                        "__class": "MapLayer",
                        "type": "wall",
                        "pixels": [center - 21, center - 21, center + 20, center - 21]
                    }
                ],
                "entities": [
                    {
                        "__class": "PointMapEntity",
                        "type": "robot_position",
                        "points": [MAP_SIZE / 2, MAP_SIZE / 2],
                        "metaData": { "angle": 0 }
                    }
                ]
            }),
            extra: serde_json::Map::new(),
        }
    }
}

impl Default for MockRobot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Robot for MockRobot {
    fn info(&self) -> RobotInfo {
        RobotInfo {
            manufacturer: "Valetudo".to_string(),
            model_name: "MockRobot".to_string(),
            model_details: json!({ "supportedAttachments": [] }),
            implementation: "MockRobot".to_string(),
        }
    }

    fn properties(&self) -> Value {
        json!({
            "firmwareVersion": env!("CARGO_PKG_VERSION"),
            "metaData": {}
        })
    }

    fn capabilities(&self) -> Vec<String> {
        vec![
            "BasicControlCapability".to_string(),
            "LocateCapability".to_string(),
        ]
    }

    async fn poll_state(&self) -> Result<RobotState> {
        let inner = self.read();
        match &inner.poll_failure {
            Some(message) => Err(RobotError::poll(message.clone())),
            None => Ok(inner.state.clone()),
        }
    }

    fn state(&self) -> RobotState {
        self.read().state.clone()
    }

    fn subscribe_events(&self) -> broadcast::Receiver<RobotEvent> {
        self.events.subscribe()
    }
}
