use crate::{
    DeliveryOutcome, HubConfig, Metrics, Result as StreamErrorResult, StreamError, StreamEvent,
    Subscriber, SubscriberId, Subscription,
};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};

/// Fans named events out to every client streaming one topic.
///
/// The subscriber map is the only shared state. It lives behind a mutex
/// that is never held across an `.await`: delivery only queues the event
/// on each session's bounded buffer, so a slow or dead client cannot stall
/// a publish. Clones share the same registry.
pub struct BroadcastHub {
    inner: Arc<Mutex<HubInner>>,
    config: Arc<HubConfig>,
    closed_tx: Arc<watch::Sender<bool>>,
    metrics: Metrics,
}

struct HubInner {
    subscribers: HashMap<SubscriberId, Subscriber<StreamEvent>>,
    closed: bool,
}

impl BroadcastHub {
    pub fn new(config: HubConfig) -> Self {
        let (closed_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                subscribers: HashMap::new(),
                closed: false,
            })),
            config: Arc::new(config),
            closed_tx: Arc::new(closed_tx),
            metrics: Metrics::new(),
        }
    }

    /// Register a new subscriber, or reject it when the hub is full or shut down.
    #[track_caller]
    pub fn subscribe(&self) -> StreamErrorResult<Subscription> {
        let mut inner = self.lock();

        if inner.closed {
            return Err(StreamError::hub_closed(&self.config.name));
        }

        if inner.subscribers.len() >= self.config.max_clients {
            warn!(
                "{} hub subscriber limit reached: {}/{}",
                self.config.name,
                inner.subscribers.len(),
                self.config.max_clients
            );
            self.metrics.subscription_rejected(&self.config.name);
            return Err(StreamError::capacity_exceeded(
                &self.config.name,
                inner.subscribers.len(),
                self.config.max_clients,
            ));
        }

        let id = SubscriberId::new();
        let (sender, receiver) = mpsc::channel(self.config.send_buffer_size);
        inner.subscribers.insert(id, Subscriber::new(id, sender));

        info!(
            "{} hub registered subscriber {id} ({} total)",
            self.config.name,
            inner.subscribers.len()
        );
        self.metrics.subscriber_added(&self.config.name);

        Ok(Subscription::new(
            id,
            receiver,
            self.closed_tx.subscribe(),
            self.clone(),
        ))
    }

    /// Deliver an event to every registered subscriber.
    ///
    /// Returns how many subscribers accepted it. Subscribers whose
    /// connection is gone are removed here; a full send buffer only costs
    /// that subscriber this event.
    pub fn publish(&self, event_name: &str, payload: impl Into<Bytes>) -> usize {
        let event = StreamEvent::new(event_name, payload);
        let mut inner = self.lock();

        if inner.closed {
            debug!("{} hub is shut down, dropping {event_name}", self.config.name);
            return 0;
        }

        let mut delivered = 0;
        inner.subscribers.retain(|id, subscriber| {
            let outcome = subscriber.deliver(event.clone());
            match outcome {
                DeliveryOutcome::Delivered => delivered += 1,
                DeliveryOutcome::Dropped => {
                    warn!(
                        "{} hub subscriber {id} is too slow, missed {event_name}",
                        self.config.name
                    );
                    self.metrics.event_dropped(&self.config.name);
                }
                DeliveryOutcome::Gone => {
                    debug!("{} hub subscriber {id} is gone, removing", self.config.name);
                    self.metrics.subscriber_removed(&self.config.name, "gone");
                }
            }
            outcome.keeps_subscriber()
        });

        debug!(
            "{} hub published {event_name} to {delivered}/{} subscribers",
            self.config.name,
            inner.subscribers.len()
        );
        self.metrics.event_published(&self.config.name, delivered);

        delivered
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.lock();

        if inner.subscribers.remove(&id).is_some() {
            info!(
                "{} hub unregistered subscriber {id} ({} remaining)",
                self.config.name,
                inner.subscribers.len()
            );
            self.metrics.subscriber_removed(&self.config.name, "closed");
            true
        } else {
            false
        }
    }

    /// End every open stream and refuse further use.
    ///
    /// Every session sees the closed signal before any event still queued
    /// for it, so nothing more is written once this returns. Calling this
    /// more than once is harmless.
    pub fn shutdown(&self) {
        let drained: Vec<_> = {
            let mut inner = self.lock();
            if inner.closed {
                return;
            }
            inner.closed = true;
            self.closed_tx.send_replace(true);
            inner.subscribers.drain().map(|(_, subscriber)| subscriber).collect()
        };

        for subscriber in &drained {
            self.metrics.subscriber_removed(&self.config.name, "shutdown");
            debug!("{} hub closing subscriber {}", self.config.name, subscriber.id);
        }

        info!(
            "{} hub shut down, closed {} subscriber(s)",
            self.config.name,
            drained.len()
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for BroadcastHub {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: Arc::clone(&self.config),
            closed_tx: Arc::clone(&self.closed_tx),
            metrics: self.metrics.clone(),
        }
    }
}
