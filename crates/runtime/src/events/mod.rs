//! Topic-based event bus for runtime events.
//!
//! This module provides a flexible event system where events are published to
//! specific topics, and consumers can subscribe only to the topics they need.
//! [`BusFeedback`] is the bridge from the core's feedback calls onto the bus.

mod bus;
mod sink;

pub use bus::{Event, EventBus, Topic};
pub use sink::BusFeedback;
