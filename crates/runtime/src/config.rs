//! Runtime configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings that shape a running session but not the rules of the game.
///
/// Gameplay tuning lives in [`mystery_core::GameConfig`] and is loaded from
/// the data directory instead.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Directory holding `config.toml` and `scenario.ron`.
    pub data_dir: PathBuf,
    /// Wall-clock time between simulation ticks.
    pub tick_interval: Duration,
    /// Broadcast capacity per event topic.
    pub event_capacity: usize,
    pub session_id: Option<String>,
    /// Seed for suspect wandering; generated when absent.
    pub game_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            tick_interval: Duration::from_millis(50),
            event_capacity: 100,
            session_id: None,
            game_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MYSTERY_DATA_DIR` - Content directory (default: `data`)
    /// - `MYSTERY_TICK_MS` - Milliseconds per tick (default: 50)
    /// - `MYSTERY_EVENT_CAPACITY` - Events buffered per topic (default: 100)
    /// - `MYSTERY_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `MYSTERY_SEED` - Game seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("MYSTERY_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(ms) = read_env::<u64>("MYSTERY_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }

        if let Some(capacity) = read_env::<usize>("MYSTERY_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config.session_id = env::var("MYSTERY_SESSION_ID").ok();
        config.game_seed = read_env::<u64>("MYSTERY_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
