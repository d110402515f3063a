//! Data-driven scenario content and loaders.
//!
//! This crate turns data files into `mystery-core` values:
//! - Room layouts and exits (RON, inside the scenario file)
//! - Starting positions of the detective and the suspects (RON)
//! - Clue placement (RON)
//! - Game configuration (TOML)
//!
//! Content is resolved once at startup; the resulting [`mystery_core::World`]
//! never reads files again.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, RoomLoader, RoomSpec, Scenario, ScenarioLoader,
};
