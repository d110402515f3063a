//! Topic-based event bus for runtime events.
//!
//! Core [`mystery_core::GameEvent`]s and session phase changes are published
//! to specific topics, and consumers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, PhaseEvent, Topic};
