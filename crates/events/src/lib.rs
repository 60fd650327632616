//! Domain events and the in-process subscription mechanics.
//!
//! State changes are described as events; subscribers (the presentation layer,
//! analytics, a checkout widget) receive them through an explicit
//! [`Subscription`] handed out by the owning store, never through a global bus.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
