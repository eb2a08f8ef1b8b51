use crate::{
    DeliveryOutcome, Metrics, MultipartFramer, Result as StreamErrorResult, StreamError,
    Subscriber, SubscriberId,
};

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};

/// Registry of clients watching the rendered map as a multipart stream.
///
/// Unlike `BroadcastHub` the source update carries no payload: a trigger
/// renders the image once and the same framed bytes go to every writer.
pub struct ImageStreamRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    framer: MultipartFramer,
    name: Arc<str>,
    max_clients: Option<usize>,
    send_buffer_size: usize,
    closed_tx: Arc<watch::Sender<bool>>,
    metrics: Metrics,
}

struct RegistryInner {
    writers: HashMap<SubscriberId, Subscriber<Bytes>>,
    closed: bool,
}

impl ImageStreamRegistry {
    pub fn new(
        name: impl Into<String>,
        framer: MultipartFramer,
        max_clients: Option<usize>,
        send_buffer_size: usize,
    ) -> Self {
        let (closed_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                writers: HashMap::new(),
                closed: false,
            })),
            framer,
            name: Arc::from(name.into()),
            max_clients,
            send_buffer_size: send_buffer_size.max(1),
            closed_tx: Arc::new(closed_tx),
            metrics: Metrics::new(),
        }
    }

    /// Register a writer. `None` for `max_clients` leaves the registry uncapped.
    #[track_caller]
    pub fn subscribe(&self) -> StreamErrorResult<ImageSubscription> {
        let mut inner = self.lock();

        if inner.closed {
            return Err(StreamError::hub_closed(&self.name));
        }

        if let Some(max) = self.max_clients
            && inner.writers.len() >= max
        {
            warn!(
                "{} stream writer limit reached: {}/{}",
                self.name,
                inner.writers.len(),
                max
            );
            self.metrics.subscription_rejected(&self.name);
            return Err(StreamError::capacity_exceeded(
                &self.name,
                inner.writers.len(),
                max,
            ));
        }

        let id = SubscriberId::new();
        let (sender, receiver) = mpsc::channel(self.send_buffer_size);
        inner.writers.insert(id, Subscriber::new(id, sender));

        info!(
            "{} stream registered writer {id} ({} total)",
            self.name,
            inner.writers.len()
        );
        self.metrics.subscriber_added(&self.name);

        Ok(ImageSubscription {
            id,
            receiver,
            closed: self.closed_tx.subscribe(),
            registry: self.clone(),
        })
    }

    /// Render once and push the frame to every writer.
    ///
    /// Nothing is rendered while no one is watching. Returns the number of
    /// writers that accepted the frame.
    pub fn trigger<F, E>(&self, render: F) -> usize
    where
        F: FnOnce() -> Result<Bytes, E>,
        E: Display,
    {
        {
            let inner = self.lock();
            if inner.closed || inner.writers.is_empty() {
                return 0;
            }
        }

        let image = match render() {
            Ok(image) => image,
            Err(e) => {
                warn!("{} stream skipped an update, render failed: {e}", self.name);
                self.metrics.render_failed(&self.name);
                return 0;
            }
        };
        self.metrics.image_rendered(&self.name);

        self.fan_out(self.framer.frame(&image))
    }

    fn fan_out(&self, frame: Bytes) -> usize {
        let mut inner = self.lock();
        if inner.closed {
            return 0;
        }

        let mut delivered = 0;
        inner.writers.retain(|id, writer| {
            let outcome = writer.deliver(frame.clone());
            match outcome {
                DeliveryOutcome::Delivered => delivered += 1,
                DeliveryOutcome::Dropped => {
                    warn!("{} stream writer {id} is too slow, skipped a frame", self.name);
                    self.metrics.event_dropped(&self.name);
                }
                DeliveryOutcome::Gone => {
                    debug!("{} stream writer {id} is gone, removing", self.name);
                    self.metrics.subscriber_removed(&self.name, "gone");
                }
            }
            outcome.keeps_subscriber()
        });

        self.metrics.event_published(&self.name, delivered);
        delivered
    }

    /// Remove a writer. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.lock();

        if inner.writers.remove(&id).is_some() {
            info!(
                "{} stream unregistered writer {id} ({} remaining)",
                self.name,
                inner.writers.len()
            );
            self.metrics.subscriber_removed(&self.name, "closed");
            true
        } else {
            false
        }
    }

    /// End every open image stream and refuse further use.
    pub fn shutdown(&self) {
        let closed = {
            let mut inner = self.lock();
            if inner.closed {
                return;
            }
            inner.closed = true;
            self.closed_tx.send_replace(true);
            let closed = inner.writers.len();
            inner.writers.clear();
            closed
        };

        for _ in 0..closed {
            self.metrics.subscriber_removed(&self.name, "shutdown");
        }
        info!("{} stream shut down, closed {closed} writer(s)", self.name);
    }

    pub fn writer_count(&self) -> usize {
        self.lock().writers.len()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn framer(&self) -> &MultipartFramer {
        &self.framer
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for ImageStreamRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            framer: self.framer.clone(),
            name: Arc::clone(&self.name),
            max_clients: self.max_clients,
            send_buffer_size: self.send_buffer_size,
            closed_tx: Arc::clone(&self.closed_tx),
            metrics: self.metrics.clone(),
        }
    }
}

/// Client side of an image stream registration; dropping it unregisters.
pub struct ImageSubscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<Bytes>,
    closed: watch::Receiver<bool>,
    registry: ImageStreamRegistry,
}

impl ImageSubscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn registry_name(&self) -> &str {
        self.registry.name()
    }

    /// True once the registry has shut down.
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Next framed image, or None once the registry has let go of this writer.
    ///
    /// Frames still queued when the registry shuts down are discarded.
    pub async fn recv(&mut self) -> Option<Bytes> {
        tokio::select! {
            biased;

            _ = self.closed.wait_for(|closed| *closed) => None,
            frame = self.receiver.recv() => frame,
        }
    }

    pub fn try_recv(&mut self) -> Option<Bytes> {
        if self.is_closed() {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    /// Stop accepting frames; the registry drops this writer on its next trigger.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl Drop for ImageSubscription {
    fn drop(&mut self) {
        self.receiver.close();
        self.registry.unsubscribe(self.id);
    }
}
