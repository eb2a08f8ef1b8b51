pub mod error;
pub mod mock_robot;
pub mod models;
pub mod renderer;
pub mod robot;

#[cfg(test)]
mod tests;

pub use error::{Result, RobotError};
pub use mock_robot::MockRobot;
pub use models::robot_event::RobotEvent;
pub use models::robot_info::RobotInfo;
pub use models::robot_state::RobotState;
pub use renderer::map_renderer::MapRenderer;
pub use renderer::svg_map_renderer::SvgMapRenderer;
pub use robot::Robot;

pub use error_location::ErrorLocation;
