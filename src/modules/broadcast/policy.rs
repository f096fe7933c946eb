use thiserror::Error;

/// How a hub hands records to its subscribers. Fixed for the hub's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Every subscriber gets the full history, then live records
    ReplayAll,
    /// Subscribers get records published after they subscribed. Each one has
    /// its own buffer of `capacity`; overflow drops records for that
    /// subscriber only.
    Multicast { capacity: usize },
    /// One consumer at a time. Records published while nobody is attached
    /// are buffered and handed to the next consumer.
    SingleConsumer,
}

impl DeliveryPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            DeliveryPolicy::ReplayAll => "replay-all",
            DeliveryPolicy::Multicast { .. } => "multicast",
            DeliveryPolicy::SingleConsumer => "single-consumer",
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubError {
    #[error("a consumer is already attached to this single-consumer stream")]
    SubscriptionConflict,

    #[error("broadcast hub is closed")]
    Closed,
}
