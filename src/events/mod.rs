//! Change notification: synchronous fan-out of payload-free signals.

pub mod bus;

pub use bus::{ChangeBus, ChangeEvent, SubscriptionId};
