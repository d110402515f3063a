//! Identifiers and value types shared by every gameplay module.
//!
//! Everything here is `Copy` (or a cheap clone) and compared by value, so
//! entities hold ids and positions instead of references to each other.
mod common;
mod direction;

pub use common::{ClueId, DialogueRef, EntityId, Position, Tick};
pub use direction::CardinalDirection;
