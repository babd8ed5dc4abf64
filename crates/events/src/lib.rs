//! Change notification for the in-memory inventory.
//!
//! The store publishes one event per successful mutation; views subscribe
//! and re-derive whatever they display.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
