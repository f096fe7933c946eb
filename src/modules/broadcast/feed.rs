use super::hub::BroadcastHub;
use super::policy::HubError;
use super::subscription::Subscription;

/// Port through which record services publish created records and hand out
/// live subscriptions. Implemented by [`BroadcastHub`].
#[cfg_attr(test, mockall::automock)]
pub trait RecordFeed<T: Send + Sync + 'static>: Send + Sync {
    fn publish(&self, record: T) -> Result<usize, HubError>;

    fn subscribe(&self) -> Result<Subscription<T>, HubError>;
}

impl<T> RecordFeed<T> for BroadcastHub<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn publish(&self, record: T) -> Result<usize, HubError> {
        BroadcastHub::publish(self, record)
    }

    fn subscribe(&self) -> Result<Subscription<T>, HubError> {
        BroadcastHub::subscribe(self)
    }
}
