/// Result of handing one item to one subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// Send buffer full; the subscriber misses this item but stays registered
    Dropped,
    /// Connection closed; the subscriber must be removed
    Gone,
}

impl DeliveryOutcome {
    pub fn keeps_subscriber(&self) -> bool {
        !matches!(self, Self::Gone)
    }
}
