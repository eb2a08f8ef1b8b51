mod robot_state;
