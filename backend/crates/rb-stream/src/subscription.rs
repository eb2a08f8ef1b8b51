use crate::{BroadcastHub, StreamEvent, SubscriberId};

use tokio::sync::{mpsc, watch};

/// Client side of a hub registration.
///
/// Dropping it unregisters the subscriber, so a session that stops being
/// polled (client disconnected) removes itself from the hub.
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<StreamEvent>,
    closed: watch::Receiver<bool>,
    hub: BroadcastHub,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriberId,
        receiver: mpsc::Receiver<StreamEvent>,
        closed: watch::Receiver<bool>,
        hub: BroadcastHub,
    ) -> Self {
        Self {
            id,
            receiver,
            closed,
            hub,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn hub_name(&self) -> &str {
        self.hub.name()
    }

    /// Next event, or None once the hub has let go of this subscriber.
    ///
    /// Events still queued when the hub shuts down are discarded.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        tokio::select! {
            biased;

            _ = self.closed.wait_for(|closed| *closed) => None,
            event = self.receiver.recv() => event,
        }
    }

    pub fn try_recv(&mut self) -> Option<StreamEvent> {
        if *self.closed.borrow() {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    /// Stop accepting events without unregistering; the hub notices on its
    /// next publish, the same way it notices a dropped connection.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.receiver.close();
        self.hub.unsubscribe(self.id);
    }
}
