use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Per-session idle timer.
///
/// Fires once the session has been silent for a whole interval; writing a
/// real event should call `reset` so busy streams carry no keep-alives.
pub struct KeepAliveTicker {
    interval: Interval,
}

impl KeepAliveTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    pub fn reset(&mut self) {
        self.interval.reset();
    }
}
