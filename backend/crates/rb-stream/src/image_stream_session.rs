use crate::{ImageSubscription, MultipartFramer};

use std::convert::Infallible;

use bytes::Bytes;
use futures::{Stream, stream};

/// One client's multipart image stream.
///
/// Starts with the part preamble and the image rendered at connect time,
/// then forwards every frame the registry pushes. Nothing is written once
/// the registry has shut down, including the connect-time frames.
pub struct ImageStreamSession {
    subscription: ImageSubscription,
    preamble: Bytes,
    first_frame: Bytes,
}

impl ImageStreamSession {
    pub fn new(subscription: ImageSubscription, framer: &MultipartFramer, image: &[u8]) -> Self {
        Self {
            subscription,
            preamble: framer.preamble(),
            first_frame: framer.frame(image),
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        let Self {
            subscription,
            preamble,
            first_frame,
        } = self;

        log::info!(
            "Image stream {} opened on {}",
            subscription.id(),
            subscription.registry_name()
        );

        // Popped from the back
        let pending = vec![first_frame, preamble];

        stream::unfold(
            (subscription, pending),
            |(mut subscription, mut pending)| async move {
                let frame = match pending.pop() {
                    Some(_) if subscription.is_closed() => return None,
                    Some(frame) => frame,
                    None => subscription.recv().await?,
                };
                Some((Ok(frame), (subscription, pending)))
            },
        )
    }
}
