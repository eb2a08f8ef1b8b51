use rb_core::MockRobot;
use rb_stream::ShutdownCoordinator;

use std::time::Duration;

use log::info;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Drive the mock robot with periodic fake updates until shutdown.
pub fn spawn(robot: MockRobot, period: Duration, shutdown: &ShutdownCoordinator) -> JoinHandle<()> {
    let mut guard = shutdown.subscribe_guard();

    tokio::spawn(async move {
        info!("Mock robot simulation every {}ms", period.as_millis());

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = guard.wait() => break,
                _ = ticker.tick() => robot.simulate_step(),
            }
        }

        info!("Mock robot simulation stopped");
    })
}
