/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Simulation ticks spent walking from one tile into the next.
    pub ticks_per_tile: u32,
    /// Percent chance per tick that a free, standing suspect takes a step.
    pub wander_chance: u32,
    /// Clues the journal must hold before an accusation counts as evidenced.
    pub min_clues_for_accusation: usize,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICKS_PER_TILE: u32 = 8;
    pub const DEFAULT_WANDER_CHANCE: u32 = 2;
    pub const DEFAULT_MIN_CLUES_FOR_ACCUSATION: usize = 3;

    pub fn new() -> Self {
        Self {
            ticks_per_tile: Self::DEFAULT_TICKS_PER_TILE,
            wander_chance: Self::DEFAULT_WANDER_CHANCE,
            min_clues_for_accusation: Self::DEFAULT_MIN_CLUES_FOR_ACCUSATION,
        }
    }

    /// Instant one-tick-per-tile movement with no wandering. Handy for scripted
    /// sessions and tests where suspects must stay put.
    pub fn still() -> Self {
        Self {
            ticks_per_tile: 1,
            wander_chance: 0,
            ..Self::new()
        }
    }

    /// Ticks per tile, never zero.
    pub fn step_ticks(&self) -> u32 {
        self.ticks_per_tile.max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
