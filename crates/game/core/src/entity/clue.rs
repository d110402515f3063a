use crate::env::RoomId;
use crate::state::{ClueId, Position};

/// A piece of evidence lying on a fixed tile of a room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clue {
    id: ClueId,
    name: String,
    description: String,
    room: RoomId,
    position: Position,
}

impl Clue {
    pub fn new(id: ClueId, name: impl Into<String>, room: RoomId, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            room,
            position,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> ClueId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn position(&self) -> Position {
        self.position
    }
}
