//! Deterministic random numbers for NPC behaviour.
//!
//! Every roll is a pure function of a seed, so a session replays identically
//! from the same game seed and command stream. Seeds are derived per roll with
//! [`compute_seed`] from the game seed, the tick, the rolling entity and a
//! context discriminator.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
///
/// Stateless by design of the oracle: each call steps the supplied seed once
/// and permutes it, so identical seeds always give identical output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic per-roll seed.
///
/// # Context Values
///
/// Use different context values when the same entity rolls more than once in
/// a tick:
///
/// - `0`: whether to wander at all
/// - `1`: which direction to wander in
pub fn compute_seed(game_seed: u64, tick: u64, entity_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing constants
    let mut hash = game_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (entity_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
