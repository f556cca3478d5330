//! Runtime orchestration for the combat simulation.
//!
//! This crate wires the core world, the content registry and a topic-based
//! event bus into one driver. Consumers embed [`Simulation`] to advance
//! frames, forward player input and subscribe to feedback.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the driver and its builder
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`error`] wraps the core's programmer errors
pub mod error;
pub mod events;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use events::{BusFeedback, Event, EventBus, Topic};
pub use simulation::{Simulation, SimulationBuilder, SimulationConfig};
