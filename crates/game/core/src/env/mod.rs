//! Read-only world data: room layouts, the room arena, and deterministic RNG.
//!
//! Rooms expose the four operations movement needs (walkability, trigger
//! detection, mat rotation, transitions) through [`RoomOracle`], so the
//! pathfinder and entity state machines never couple to a concrete layout.
mod error;
mod map;
mod rng;
mod room;
mod rooms;

pub use error::RoomError;
pub use map::{MapDimensions, RoomOracle, StaticTile, TerrainKind, Walkable};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use room::{Room, Transition, Trigger};
pub use rooms::{RoomId, Rooms};
