use crate::{
    KEEP_ALIVE_FRAME, KeepAliveTicker, Metrics, Subscription, create_session_span, encode_event,
};

use std::convert::Infallible;
use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use tracing::Instrument;

/// One client's event stream on a hub.
///
/// Produces the frames to write on the HTTP response: encoded events as
/// they are published, and a keep-alive comment whenever the stream has
/// been idle for a whole interval. The stream ends when the hub lets go of
/// the subscriber (shutdown). When the client disconnects the HTTP layer
/// drops the stream, and dropping the session unregisters it.
pub struct EventStreamSession {
    subscription: Subscription,
    keep_alive: KeepAliveTicker,
    metrics: Metrics,
    span: tracing::Span,
}

impl EventStreamSession {
    pub fn new(subscription: Subscription, keep_alive_interval: Duration) -> Self {
        let span = create_session_span(subscription.hub_name(), subscription.id());
        Self {
            subscription,
            keep_alive: KeepAliveTicker::new(keep_alive_interval),
            metrics: Metrics::new(),
            span,
        }
    }

    /// Next frame to write, or None when the stream is over.
    pub async fn next_frame(&mut self) -> Option<Bytes> {
        let span = self.span.clone();
        async move {
            tokio::select! {
                biased;

                event = self.subscription.recv() => {
                    let event = event?;
                    self.keep_alive.reset();
                    self.metrics.event_sent(self.subscription.hub_name(), &event.event_name);
                    Some(encode_event(&event))
                }

                _ = self.keep_alive.tick() => {
                    tracing::trace!("keep-alive");
                    self.metrics.keep_alive_sent(self.subscription.hub_name());
                    Some(Bytes::from_static(KEEP_ALIVE_FRAME))
                }
            }
        }
        .instrument(span)
        .await
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        log::info!(
            "Event stream {} opened on {} hub",
            self.subscription.id(),
            self.subscription.hub_name()
        );

        futures::stream::unfold(self, |mut session| async move {
            let frame = session.next_frame().await?;
            Some((Ok(frame), session))
        })
    }
}

impl Drop for EventStreamSession {
    fn drop(&mut self) {
        log::info!(
            "Event stream {} closed on {} hub",
            self.subscription.id(),
            self.subscription.hub_name()
        );
    }
}
