//! The streaming channels exposed by the server.
//!
//! Three event-stream hubs (state, attributes, map) plus the multipart map
//! image registry, created together and shut down together.

use rb_config::{Config, ImageStreamConfig, StreamConfig};
use rb_stream::{BroadcastHub, HubConfig, ImageStreamRegistry, MultipartFramer};

use std::time::Duration;

use log::info;
use serde::Serialize;

pub const STATE_HUB: &str = "state";
pub const ATTRIBUTES_HUB: &str = "attributes";
pub const MAP_HUB: &str = "map";
pub const MAP_IMAGE_REGISTRY: &str = "map_image";

#[derive(Clone)]
pub struct HubSet {
    pub state: BroadcastHub,
    pub attributes: BroadcastHub,
    pub map: BroadcastHub,
    pub map_image: ImageStreamRegistry,
}

/// Open connections per channel, reported by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HubCounts {
    pub state: usize,
    pub attributes: usize,
    pub map: usize,
    pub map_image: usize,
}

impl HubSet {
    pub fn new(streams: &StreamConfig, image_stream: &ImageStreamConfig) -> Self {
        let hub = |name: &str| {
            BroadcastHub::new(
                HubConfig::new(name)
                    .with_keep_alive_interval(Duration::from_millis(streams.keep_alive_interval_ms))
                    .with_max_clients(streams.max_clients)
                    .with_send_buffer_size(streams.send_buffer_size),
            )
        };

        Self {
            state: hub(STATE_HUB),
            attributes: hub(ATTRIBUTES_HUB),
            map: hub(MAP_HUB),
            map_image: ImageStreamRegistry::new(
                MAP_IMAGE_REGISTRY,
                MultipartFramer::default(),
                image_stream.max_clients(),
                image_stream.send_buffer_size,
            ),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.streams, &config.image_stream)
    }

    /// End every open stream. Safe to call more than once.
    pub fn shutdown(&self) {
        info!("Closing all streams");
        self.state.shutdown();
        self.attributes.shutdown();
        self.map.shutdown();
        self.map_image.shutdown();
    }

    pub fn counts(&self) -> HubCounts {
        HubCounts {
            state: self.state.subscriber_count(),
            attributes: self.attributes.subscriber_count(),
            map: self.map.subscriber_count(),
            map_image: self.map_image.writer_count(),
        }
    }
}
