//! Deterministic gameplay logic for a tile-based murder-mystery adventure.
//!
//! `mystery-core` defines the canonical rules (grid movement, pathfinding,
//! interaction dispatch, clue journal) and exposes pure APIs that are driven
//! by the runtime session and inspected by any presentation layer.
//! All world mutation flows through [`world::World`], and supporting crates
//! depend on the types re-exported here.
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod event;
pub mod journal;
pub mod nav;
pub mod state;
pub mod world;

pub use config::GameConfig;
pub use entity::{
    Clue, Interaction, MoveOutcome, MovementState, Mover, Player, StepOutcome, Suspect,
};
pub use env::{
    MapDimensions, PcgRng, Room, RoomError, RoomId, RoomOracle, Rooms, RngOracle, StaticTile,
    TerrainKind, Transition, Trigger, Walkable, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{EventSink, GameEvent};
pub use journal::Journal;
pub use nav::{Occupancy, closest_neighbour, find_path};
pub use state::{CardinalDirection, ClueId, DialogueRef, EntityId, Position, Tick};
pub use world::{World, WorldError};
