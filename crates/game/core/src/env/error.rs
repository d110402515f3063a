//! Room lookup errors.

use crate::env::RoomId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

/// Errors raised by room layouts and the room arena.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomError {
    /// Transition data was requested for a tile that is not an exit.
    #[error("tile {position} in room {room} is not a trigger tile")]
    NotATrigger { room: RoomId, position: Position },

    /// A room id does not name any room in the arena.
    #[error("room {0} does not exist")]
    UnknownRoom(RoomId),

    /// Layout construction addressed a tile outside the room.
    #[error("tile {position} is outside room {room}")]
    OutOfBounds { room: RoomId, position: Position },
}

impl GameError for RoomError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Asking a plain tile for its exit means the entity and the room disagree.
            RoomError::NotATrigger { .. } => ErrorSeverity::Fatal,
            RoomError::UnknownRoom(_) | RoomError::OutOfBounds { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RoomError::NotATrigger { .. } => "ROOM_NOT_A_TRIGGER",
            RoomError::UnknownRoom(_) => "ROOM_UNKNOWN",
            RoomError::OutOfBounds { .. } => "ROOM_OUT_OF_BOUNDS",
        }
    }
}
