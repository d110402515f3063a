//! Messages raised by the core for the game-state controller.
//!
//! The core never calls into screens or global state. Operations that can
//! trigger a transition take an [`EventSink`] and push [`GameEvent`]s into it;
//! the runtime decides what each event means for the session.

use crate::env::RoomId;
use crate::state::{ClueId, EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// The player arrived next to a suspect it asked to talk to.
    InterviewRequested { suspect: EntityId },
    /// The player arrived at a clue it clicked on; collecting it is up to the caller.
    ClueReached { clue: ClueId },
    /// The player faced the exit mat it is standing on.
    RoomChangeRequested { room: RoomId, position: Position },
    RoomChanged {
        from: RoomId,
        to: RoomId,
        position: Position,
    },
    ClueCollected { clue: ClueId },
    SuspectAccused { suspect: EntityId, correct: bool },
}

/// Destination for [`GameEvent`]s. Emission is fire-and-forget.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}
