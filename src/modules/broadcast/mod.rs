//! Live feeds of newly created records.

pub mod feed;
pub mod frames;
pub mod hub;
pub mod policy;
pub mod subscription;

pub use feed::RecordFeed;
pub use hub::BroadcastHub;
pub use policy::{DeliveryPolicy, HubError};
pub use subscription::{Subscription, SubscriptionId};

#[cfg(test)]
pub use feed::MockRecordFeed;
