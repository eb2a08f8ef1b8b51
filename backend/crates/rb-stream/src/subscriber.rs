use crate::{DeliveryOutcome, SubscriberId};

use tokio::sync::mpsc::{self, error::TrySendError};

/// Hub-side handle of one connected client.
///
/// Delivery never waits: the item is queued on the session's bounded
/// send buffer, or the outcome says why it could not be.
#[derive(Debug)]
pub struct Subscriber<T> {
    pub id: SubscriberId,
    sender: mpsc::Sender<T>,
}

impl<T> Subscriber<T> {
    pub fn new(id: SubscriberId, sender: mpsc::Sender<T>) -> Self {
        Self { id, sender }
    }

    pub fn deliver(&self, item: T) -> DeliveryOutcome {
        match self.sender.try_send(item) {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(TrySendError::Full(_)) => DeliveryOutcome::Dropped,
            Err(TrySendError::Closed(_)) => DeliveryOutcome::Gone,
        }
    }
}
