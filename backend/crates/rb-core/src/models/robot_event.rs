use std::fmt;

/// Change notifications raised by a robot.
///
/// The `as_str` names are sent verbatim as the event-stream event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotEvent {
    StateUpdated,
    StateAttributesUpdated,
    MapUpdated,
}

impl RobotEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateUpdated => "StateUpdated",
            Self::StateAttributesUpdated => "StateAttributesUpdated",
            Self::MapUpdated => "MapUpdated",
        }
    }
}

impl fmt::Display for RobotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
