//! Characters and objects that occupy the grid.
//!
//! [`Mover`] is the single movement state machine; [`Player`] and [`Suspect`]
//! embed one and layer their own behaviour on top. Arrival is reported as a
//! [`StepOutcome`] so the world can resolve on-arrival intents with access to
//! every entity at once.
mod clue;
mod mover;
mod player;
mod suspect;

pub use clue::Clue;
pub use mover::{MoveOutcome, MovementState, Mover, StepOutcome};
pub use player::{Interaction, Player};
pub use suspect::Suspect;
