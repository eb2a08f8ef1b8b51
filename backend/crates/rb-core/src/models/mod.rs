pub mod robot_event;
pub mod robot_info;
pub mod robot_state;
