//! # In-process broadcast hub for newly created records.
//!
//! [`BroadcastHub`] fans records out to any number of [`Subscription`]s under
//! one of three [`DeliveryPolicy`]s.
//!
//! ```text
//! Record services (many):            Subscribers (many):
//!   create ──┐                         ┌──► Subscription 1 (own queue)
//!   create ──┼──► publish ──► Hub ─────┼──► Subscription 2 (own queue)
//!   create ──┘     (one mutex)         └──► Subscription N (own queue)
//! ```
//!
//! ## Rules
//! - **Total order**: publish, subscribe and unsubscribe all take the same
//!   mutex, so every subscriber sees records in publish order and a
//!   subscribe racing a publish lands fully before or fully after it.
//! - **Never blocks**: enqueueing is `send`/`try_send`; the lock is never
//!   held across an `.await`.
//! - **Isolation**: a full multicast buffer drops records for that
//!   subscriber only (counted by [`Subscription::missed`]).
//! - **No persistence**: history lives as long as the hub.
//! - **Hand-over**: records a single consumer had queued but not read when
//!   its handle detaches go back to the pending queue for the next one.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::warn;

use super::policy::{DeliveryPolicy, HubError};
use super::subscription::{Inbox, Liveness, Subscription, SubscriptionId};
use crate::shared::utils::LogContext;

enum Outlet<T> {
    Bounded(mpsc::Sender<T>),
    Unbounded(mpsc::UnboundedSender<T>),
}

struct Subscriber<T> {
    outlet: Outlet<T>,
    liveness: Arc<Liveness>,
}

enum Delivery {
    Delivered,
    Dropped,
    Gone,
}

impl<T> Subscriber<T> {
    fn deliver(&self, record: T) -> Delivery {
        match &self.outlet {
            Outlet::Unbounded(tx) => match tx.send(record) {
                Ok(()) => Delivery::Delivered,
                Err(_) => Delivery::Gone,
            },
            Outlet::Bounded(tx) => match tx.try_send(record) {
                Ok(()) => Delivery::Delivered,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    self.liveness.missed.fetch_add(1, Ordering::Relaxed);
                    Delivery::Dropped
                }
                Err(mpsc::error::TrySendError::Closed(_)) => Delivery::Gone,
            },
        }
    }
}

pub(crate) struct HubState<T> {
    policy: DeliveryPolicy,
    closed: bool,
    next_id: SubscriptionId,
    history: Vec<T>,
    pending: VecDeque<T>,
    subscribers: BTreeMap<SubscriptionId, Subscriber<T>>,
}

impl<T> HubState<T> {
    /// Removes a subscriber and marks its handle closed
    pub(crate) fn detach(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.remove(&id) {
            Some(subscriber) => {
                subscriber.liveness.close();
                true
            }
            None => false,
        }
    }

    /// Whether a departing consumer's unread records go back to the queue
    pub(crate) fn keeps_unread(&self) -> bool {
        self.policy == DeliveryPolicy::SingleConsumer && !self.closed
    }

    /// Puts records a detached consumer never read back at the head of the
    /// pending queue, ahead of anything buffered since.
    pub(crate) fn requeue(&mut self, unread: Vec<T>) {
        if unread.is_empty() {
            return;
        }
        if !self.subscribers.is_empty() {
            warn!(count = unread.len(), "consumer already attached, unread records dropped");
            return;
        }
        for record in unread.into_iter().rev() {
            self.pending.push_front(record);
        }
    }
}

pub(crate) fn lock_state<T>(state: &Mutex<HubState<T>>) -> MutexGuard<'_, HubState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared publish/subscribe point for one record stream.
///
/// Owned by the composition root and handed to producers and consumers as
/// `Arc<BroadcastHub<T>>`.
pub struct BroadcastHub<T> {
    name: String,
    policy: DeliveryPolicy,
    state: Arc<Mutex<HubState<T>>>,
}

impl<T> BroadcastHub<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(name: impl Into<String>, policy: DeliveryPolicy) -> Self {
        let policy = match policy {
            DeliveryPolicy::Multicast { capacity } => DeliveryPolicy::Multicast {
                capacity: capacity.max(1),
            },
            other => other,
        };

        Self {
            name: name.into(),
            policy,
            state: Arc::new(Mutex::new(HubState {
                policy,
                closed: false,
                next_id: 1,
                history: Vec::new(),
                pending: VecDeque::new(),
                subscribers: BTreeMap::new(),
            })),
        }
    }

    pub fn replay_all(name: impl Into<String>) -> Self {
        Self::new(name, DeliveryPolicy::ReplayAll)
    }

    pub fn multicast(name: impl Into<String>, capacity: usize) -> Self {
        Self::new(name, DeliveryPolicy::Multicast { capacity })
    }

    pub fn single_consumer(name: impl Into<String>) -> Self {
        Self::new(name, DeliveryPolicy::SingleConsumer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Publishes a record to the stream.
    ///
    /// Returns how many queues received it. For a single-consumer hub with no
    /// consumer attached the record is buffered and counts as one.
    pub fn publish(&self, record: T) -> Result<usize, HubError> {
        let mut state = lock_state(&self.state);
        if state.closed {
            return Err(HubError::Closed);
        }

        if state.policy == DeliveryPolicy::ReplayAll {
            state.history.push(record.clone());
        }

        if state.policy == DeliveryPolicy::SingleConsumer && state.subscribers.is_empty() {
            state.pending.push_back(record);
            LogContext::broadcast(&self.name, "buffered", 0);
            return Ok(1);
        }

        let mut delivered = 0;
        let mut gone = Vec::new();
        for (id, subscriber) in &state.subscribers {
            match subscriber.deliver(record.clone()) {
                Delivery::Delivered => delivered += 1,
                Delivery::Dropped => {
                    warn!(stream = %self.name, subscription = *id, "subscriber buffer full, record dropped")
                }
                Delivery::Gone => gone.push(*id),
            }
        }
        for id in gone {
            state.detach(id);
        }

        LogContext::broadcast(&self.name, "publish", state.subscribers.len());
        Ok(delivered)
    }

    /// Attaches a new subscriber according to the hub's policy
    pub fn subscribe(&self) -> Result<Subscription<T>, HubError> {
        let mut state = lock_state(&self.state);
        if state.closed {
            return Err(HubError::Closed);
        }

        let policy = state.policy;
        let (outlet, inbox) = match policy {
            DeliveryPolicy::ReplayAll => {
                let (tx, rx) = mpsc::unbounded_channel();
                for record in &state.history {
                    // receiver is alive, it is still local
                    let _ = tx.send(record.clone());
                }
                (Outlet::Unbounded(tx), Inbox::Unbounded(rx))
            }
            DeliveryPolicy::Multicast { capacity } => {
                let (tx, rx) = mpsc::channel(capacity);
                (Outlet::Bounded(tx), Inbox::Bounded(rx))
            }
            DeliveryPolicy::SingleConsumer => {
                if !state.subscribers.is_empty() {
                    return Err(HubError::SubscriptionConflict);
                }
                let (tx, rx) = mpsc::unbounded_channel();
                for record in state.pending.drain(..) {
                    let _ = tx.send(record);
                }
                (Outlet::Unbounded(tx), Inbox::Unbounded(rx))
            }
        };

        let id = state.next_id;
        state.next_id += 1;

        let liveness = Arc::new(Liveness::new());
        state.subscribers.insert(
            id,
            Subscriber {
                outlet,
                liveness: liveness.clone(),
            },
        );
        LogContext::broadcast(&self.name, "subscribe", state.subscribers.len());

        Ok(Subscription::new(
            id,
            inbox,
            liveness,
            Arc::downgrade(&self.state),
        ))
    }

    /// Detaches a subscription; it yields nothing afterwards
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = lock_state(&self.state);
        let removed = state.detach(id);
        if removed {
            LogContext::broadcast(&self.name, "unsubscribe", state.subscribers.len());
        }
        removed
    }

    /// Shuts the hub down. Open subscriptions drain what was already queued
    /// and then end; publish and subscribe fail with [`HubError::Closed`].
    pub fn close(&self) {
        let mut state = lock_state(&self.state);
        if state.closed {
            return;
        }
        state.closed = true;
        state.subscribers.clear();
        state.history.clear();
        state.pending.clear();
        LogContext::broadcast(&self.name, "closed", 0);
    }

    pub fn is_closed(&self) -> bool {
        lock_state(&self.state).closed
    }

    pub fn subscriber_count(&self) -> usize {
        lock_state(&self.state).subscribers.len()
    }

    /// Records retained for replay
    pub fn history_len(&self) -> usize {
        lock_state(&self.state).history.len()
    }

    /// Records waiting for a single consumer
    pub fn pending_len(&self) -> usize {
        lock_state(&self.state).pending.len()
    }
}
