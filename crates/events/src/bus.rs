//! Event publishing/subscription abstraction.
//!
//! A bus fans every published message out to all current subscribers
//! (broadcast semantics). It carries no state of its own: the store remains
//! the source of truth, and a subscriber that misses a message can always
//! re-read the store.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError, TryRecvError};

/// A subscription to an event stream.
///
/// ```ignore
/// let changes = store.subscribe();
/// store.adjust_stock(cmd)?;
///
/// while let Ok(event) = changes.try_recv() {
///     refresh(event.event_type());
/// }
/// ```
///
/// Messages arrive in publish order. A subscription is meant to be drained
/// by a single consumer.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every message that is already queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Pub/sub abstraction used for store change notification.
///
/// `publish()` may fail (e.g. poisoned lock); callers decide whether that
/// matters. Implementations must be shareable across threads so subscribers
/// can live outside the thread that owns the store.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
