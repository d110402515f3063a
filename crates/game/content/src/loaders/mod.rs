//! Content loaders for reading game data from files.
//!
//! Loaders convert RON/TOML files into core types. Scenario files refer to
//! rooms by name; [`RoomLoader`] resolves those names to arena ids.

pub mod config;
pub mod factory;
pub mod rooms;
pub mod scenario;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use rooms::{ExitSpec, RoomLoader, RoomSpec};
pub use scenario::{Scenario, ScenarioLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
