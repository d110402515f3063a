use std::fmt;

use crate::env::{Room, RoomError};

/// Stable index of a room in the [`Rooms`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomId(pub u16);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Arena of every room in a scenario.
///
/// Entities store a [`RoomId`] rather than a reference, so changing room is a
/// field rewrite and reloading never leaves a dangling room behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rooms {
    rooms: Vec<Room>,
}

impl Rooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room and assigns its id. Ids are handed out in insertion order.
    pub fn push(&mut self, mut room: Room) -> RoomId {
        let id = RoomId(self.rooms.len() as u16);
        room.assign_id(id);
        self.rooms.push(room);
        id
    }

    /// # Errors
    ///
    /// Returns [`RoomError::UnknownRoom`] if `id` was never handed out.
    pub fn get(&self, id: RoomId) -> Result<&Room, RoomError> {
        self.rooms
            .get(id.0 as usize)
            .ok_or(RoomError::UnknownRoom(id))
    }

    pub fn by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name() == name)
    }

    pub fn contains(&self, id: RoomId) -> bool {
        (id.0 as usize) < self.rooms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
