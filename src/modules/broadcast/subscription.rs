use futures::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, Weak};
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use super::hub::{lock_state, HubState};

pub type SubscriptionId = u64;

/// State shared between a subscription handle and the hub's entry for it
pub(crate) struct Liveness {
    open: AtomicBool,
    pub(crate) missed: AtomicU64,
}

impl Liveness {
    pub(crate) fn new() -> Self {
        Self {
            open: AtomicBool::new(true),
            missed: AtomicU64::new(0),
        }
    }

    pub(crate) fn close(&self) -> bool {
        self.open.swap(false, Ordering::AcqRel)
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

pub(crate) enum Inbox<T> {
    Bounded(mpsc::Receiver<T>),
    Unbounded(mpsc::UnboundedReceiver<T>),
}

impl<T> Inbox<T> {
    fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        match self {
            Inbox::Bounded(rx) => rx.poll_recv(cx),
            Inbox::Unbounded(rx) => rx.poll_recv(cx),
        }
    }

    fn try_recv(&mut self) -> Option<T> {
        match self {
            Inbox::Bounded(rx) => rx.try_recv().ok(),
            Inbox::Unbounded(rx) => rx.try_recv().ok(),
        }
    }

    fn close(&mut self) {
        match self {
            Inbox::Bounded(rx) => rx.close(),
            Inbox::Unbounded(rx) => rx.close(),
        }
    }
}

/// A live, ordered feed of records from one hub.
///
/// `Open` until it is unsubscribed, dropped, or the hub is closed and its
/// queue is drained. Once detached it never yields another record, even if
/// some were already queued. On a single-consumer hub those queued records
/// are handed back to the hub for the next consumer.
pub struct Subscription<T> {
    id: SubscriptionId,
    inbox: Inbox<T>,
    liveness: std::sync::Arc<Liveness>,
    hub: Weak<Mutex<HubState<T>>>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(
        id: SubscriptionId,
        inbox: Inbox<T>,
        liveness: std::sync::Arc<Liveness>,
        hub: Weak<Mutex<HubState<T>>>,
    ) -> Self {
        Self {
            id,
            inbox,
            liveness,
            hub,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.liveness.is_open()
    }

    /// Records dropped because this subscriber's buffer was full
    pub fn missed(&self) -> u64 {
        self.liveness.missed.load(Ordering::Relaxed)
    }

    /// Waits for the next record. `None` once the subscription is closed.
    pub async fn recv(&mut self) -> Option<T> {
        futures::future::poll_fn(|cx| self.poll_recv(cx)).await
    }

    /// Next queued record without waiting
    pub fn try_recv(&mut self) -> Option<T> {
        if !self.is_open() {
            return None;
        }
        self.inbox.try_recv()
    }

    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        if !self.is_open() {
            return Poll::Ready(None);
        }
        self.inbox.poll_recv(cx)
    }

    /// Detaches from the hub
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(shared) = self.hub.upgrade() {
            let mut state = lock_state(&shared);
            state.detach(self.id);
            if state.keeps_unread() {
                let mut unread = Vec::new();
                while let Some(record) = self.inbox.try_recv() {
                    unread.push(record);
                }
                state.requeue(unread);
            }
        }
        self.liveness.close();
        self.inbox.close();
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<T> Unpin for Subscription<T> {}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::super::BroadcastHub;
    use futures::StreamExt;
    use std::time::Duration;

    #[tokio::test]
    async fn recv_waits_for_publish() {
        let hub = std::sync::Arc::new(BroadcastHub::multicast("test", 4));
        let mut sub = hub.subscribe().unwrap();

        let producer = hub.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            producer.publish("late").unwrap();
        });

        assert_eq!(sub.recv().await, Some("late"));
    }

    #[tokio::test]
    async fn stream_ends_after_hub_close() {
        let hub = BroadcastHub::replay_all("test");
        hub.publish(1).unwrap();
        hub.publish(2).unwrap();
        let sub = hub.subscribe().unwrap();
        hub.close();

        let received: Vec<i32> = sub.collect().await;
        assert_eq!(received, vec![1, 2]);
    }

    #[tokio::test]
    async fn unsubscribe_releases_single_consumer_slot() {
        let hub = BroadcastHub::single_consumer("test");
        let sub = hub.subscribe().unwrap();
        sub.unsubscribe();
        hub.publish("after").unwrap();

        let mut next = hub.subscribe().unwrap();
        assert_eq!(next.recv().await, Some("after"));
    }
}
