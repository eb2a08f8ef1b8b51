pub mod broadcast_hub;
pub mod delivery_outcome;
pub mod error;
pub mod event_stream_session;
pub mod framing;
pub mod hub_config;
pub mod image_stream_registry;
pub mod image_stream_session;
pub mod keep_alive;
pub mod metrics;
pub mod response;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod stream_event;
pub mod subscriber;
pub mod subscriber_id;
pub mod subscription;

pub use broadcast_hub::BroadcastHub;
pub use delivery_outcome::DeliveryOutcome;
pub use error::{Result, StreamError};
pub use event_stream_session::EventStreamSession;
pub use framing::multipart::{MULTIPART_BOUNDARY, MultipartFramer};
pub use framing::sse::{KEEP_ALIVE_FRAME, encode_event};
pub use hub_config::HubConfig;
pub use image_stream_registry::{ImageStreamRegistry, ImageSubscription};
pub use image_stream_session::ImageStreamSession;
pub use keep_alive::KeepAliveTicker;
pub use metrics::Metrics;
pub use response::{event_stream_response, image_stream_response};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use stream_event::StreamEvent;
pub use subscriber::Subscriber;
pub use subscriber_id::SubscriberId;
pub use subscription::Subscription;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one streaming connection.
pub fn create_session_span(hub: &str, subscriber_id: SubscriberId) -> tracing::Span {
    info_span!(
        "stream_session",
        hub = %hub,
        subscriber_id = %subscriber_id,
    )
}
