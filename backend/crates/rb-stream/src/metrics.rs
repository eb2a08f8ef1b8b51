use metrics::{counter, gauge};

/// Metrics collector for streaming hubs
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "rb_stream" }
    }

    /// Record a subscriber joining a hub
    pub fn subscriber_added(&self, hub: &str) {
        counter!(format!("{}.subscribers.added", self.prefix), "hub" => hub.to_string())
            .increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix), "hub" => hub.to_string())
            .increment(1.0);
    }

    /// Record a subscriber leaving a hub (`closed`, `gone` or `shutdown`)
    pub fn subscriber_removed(&self, hub: &str, reason: &str) {
        counter!(
            format!("{}.subscribers.removed.{}", self.prefix, reason),
            "hub" => hub.to_string()
        )
        .increment(1);
        gauge!(format!("{}.subscribers.active", self.prefix), "hub" => hub.to_string())
            .decrement(1.0);
    }

    /// Record a subscribe attempt turned away
    pub fn subscription_rejected(&self, hub: &str) {
        counter!(format!("{}.subscribers.rejected", self.prefix), "hub" => hub.to_string())
            .increment(1);
    }

    /// Record a publish and how many subscribers took it
    pub fn event_published(&self, hub: &str, delivered: usize) {
        counter!(format!("{}.events.published", self.prefix), "hub" => hub.to_string())
            .increment(1);
        counter!(format!("{}.events.delivered", self.prefix), "hub" => hub.to_string())
            .increment(delivered as u64);
    }

    /// Record an event skipped for a slow subscriber
    pub fn event_dropped(&self, hub: &str) {
        counter!(format!("{}.events.dropped", self.prefix), "hub" => hub.to_string())
            .increment(1);
    }

    /// Record an event frame written by a session
    pub fn event_sent(&self, hub: &str, event_name: &str) {
        counter!(
            format!("{}.events.sent", self.prefix),
            "hub" => hub.to_string(),
            "event" => event_name.to_string()
        )
        .increment(1);
    }

    pub fn keep_alive_sent(&self, hub: &str) {
        counter!(format!("{}.keep_alive.sent", self.prefix), "hub" => hub.to_string())
            .increment(1);
    }

    pub fn image_rendered(&self, registry: &str) {
        counter!(format!("{}.images.rendered", self.prefix), "hub" => registry.to_string())
            .increment(1);
    }

    pub fn render_failed(&self, registry: &str) {
        counter!(format!("{}.images.failed", self.prefix), "hub" => registry.to_string())
            .increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
