//! Event bus for live console updates.
//!
//! The presentation layer subscribes to mutation events instead of
//! polling. One event is broadcast per accepted mutation.

pub mod bus;
pub mod types;

pub use bus::EventBus;
pub use types::{ConsoleEvent, DropReason, EventFilter, EventSubscription, SubscriberId};
