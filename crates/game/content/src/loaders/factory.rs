//! Content factory for building a world from data files.

use std::path::{Path, PathBuf};

use mystery_core::{GameConfig, World};

use crate::loaders::{ConfigLoader, LoadResult, Scenario, ScenarioLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenario.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the case from `scenario.ron`.
    pub fn load_scenario(&self) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenario.ron");
        ScenarioLoader::load(&path)
    }

    /// Loads config and scenario and assembles a seeded [`World`].
    pub fn load_world(&self, game_seed: u64) -> LoadResult<World> {
        let config = self.load_config()?;
        let world = self
            .load_scenario()?
            .into_world(config)
            .map_err(|e| {
                anyhow::anyhow!("Invalid scenario in {}: {}", self.data_dir.display(), e)
            })?;
        Ok(world.with_seed(game_seed))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
