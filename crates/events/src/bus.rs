//! Event publishing/subscription abstraction (mechanics only).
//!
//! The owning store publishes each applied event; every live [`Subscription`]
//! receives its own copy (broadcast semantics). Delivery is in publish order
//! for a single publisher. The bus keeps no history: a subscriber only sees
//! events published after it subscribed.

use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = store.subscribe();
/// store.add_item(product);
///
/// while let Ok(envelope) = subscription.try_recv() {
///     render(envelope.payload());
/// }
/// ```
///
/// Dropping the subscription unsubscribes; the bus prunes dead receivers on the
/// next publish.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain everything currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Pub/sub abstraction used by stores to notify their subscribers.
///
/// The trait requires `Send + Sync` so a store can be handed to another
/// thread, but publication itself is synchronous.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}
