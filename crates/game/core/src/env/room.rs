use std::collections::HashMap;

use crate::env::{MapDimensions, RoomError, RoomId, RoomOracle, StaticTile, TerrainKind, Walkable};
use crate::state::{CardinalDirection, Position};

/// Where a trigger tile leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub destination_room: RoomId,
    pub destination_position: Position,
    /// Facing on arrival; `None` keeps the facing the character walked out with.
    pub destination_direction: Option<CardinalDirection>,
}

/// An exit mat: activated by facing `facing` while standing on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trigger {
    pub facing: CardinalDirection,
    pub transition: Transition,
}

/// A single room: a rectangular tile grid plus its exits.
///
/// Rooms are built once by content loading and are read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    name: String,
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
    triggers: HashMap<Position, Trigger>,
}

impl Room {
    /// An all-floor room. The id is assigned when the room joins a [`crate::Rooms`] arena.
    pub fn new(name: impl Into<String>, dimensions: MapDimensions) -> Self {
        Self {
            id: RoomId::default(),
            name: name.into(),
            dimensions,
            tiles: vec![StaticTile::new(TerrainKind::Floor); dimensions.area()],
            triggers: HashMap::new(),
        }
    }

    /// Parses an ASCII layout, top row first. `.` is floor, `#` wall, `T`
    /// furniture, a space is void; anything else is rejected as `None`.
    pub fn from_ascii(name: impl Into<String>, rows: &[&str]) -> Option<Self> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|row| row.chars().count()).max()? as u32;
        let mut room = Self::new(name, MapDimensions::new(width, height));
        for (row_index, row) in rows.iter().enumerate() {
            let y = (height as i32) - 1 - row_index as i32;
            for (x, symbol) in row.chars().enumerate() {
                let terrain = match symbol {
                    '.' => TerrainKind::Floor,
                    '#' => TerrainKind::Wall,
                    'T' => TerrainKind::Furniture,
                    ' ' => TerrainKind::Void,
                    _ => return None,
                };
                room.set_tile(Position::new(x as i32, y), terrain).ok()?;
            }
        }
        Some(room)
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: RoomId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.tiles.get(index))
            .copied()
    }

    /// Overrides the terrain of one tile.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::OutOfBounds`] if `position` lies outside the room.
    pub fn set_tile(&mut self, position: Position, terrain: TerrainKind) -> Result<(), RoomError> {
        let index = self
            .dimensions
            .index_of(position)
            .ok_or(RoomError::OutOfBounds {
                room: self.id,
                position,
            })?;
        self.tiles[index] = StaticTile::new(terrain);
        Ok(())
    }

    /// Places an exit mat.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::OutOfBounds`] if `position` lies outside the room.
    pub fn add_trigger(&mut self, position: Position, trigger: Trigger) -> Result<(), RoomError> {
        if !self.dimensions.contains(position) {
            return Err(RoomError::OutOfBounds {
                room: self.id,
                position,
            });
        }
        self.triggers.insert(position, trigger);
        Ok(())
    }

    pub fn triggers(&self) -> impl Iterator<Item = (Position, &Trigger)> {
        self.triggers.iter().map(|(position, trigger)| (*position, trigger))
    }
}

impl Walkable for Room {
    fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(StaticTile::is_walkable)
    }
}

impl RoomOracle for Room {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_trigger_tile(&self, position: Position) -> bool {
        self.triggers.contains_key(&position)
    }

    fn mat_rotation(&self, position: Position) -> Option<CardinalDirection> {
        self.triggers.get(&position).map(|trigger| trigger.facing)
    }

    fn transition_for(&self, position: Position) -> Result<&Transition, RoomError> {
        self.triggers
            .get(&position)
            .map(|trigger| &trigger.transition)
            .ok_or(RoomError::NotATrigger {
                room: self.id,
                position,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorSeverity, GameError};

    fn hall() -> Room {
        let mut room = Room::from_ascii("hall", &["#####", "#...#", "#.T.#", "#...#", "#####"])
            .expect("valid layout");
        room.add_trigger(
            Position::new(3, 1),
            Trigger {
                facing: CardinalDirection::East,
                transition: Transition {
                    destination_room: RoomId(1),
                    destination_position: Position::new(1, 1),
                    destination_direction: Some(CardinalDirection::East),
                },
            },
        )
        .expect("in bounds");
        room
    }

    #[test]
    fn ascii_rows_map_top_row_to_highest_y() {
        let room = hall();
        assert!(!room.is_walkable(Position::new(0, 4)));
        assert!(room.is_walkable(Position::new(1, 3)));
        assert!(!room.is_walkable(Position::new(2, 2)), "furniture blocks");
        assert!(!room.is_walkable(Position::new(-1, 2)), "out of bounds");
        assert!(!room.is_walkable(Position::new(5, 2)), "out of bounds");
        assert!(Room::from_ascii("bad", &["#?#"]).is_none());
    }

    #[test]
    fn trigger_queries() {
        let room = hall();
        let mat = Position::new(3, 1);
        assert!(room.is_trigger_tile(mat));
        assert_eq!(room.mat_rotation(mat), Some(CardinalDirection::East));
        assert_eq!(room.transition_for(mat).unwrap().destination_room, RoomId(1));
        assert!(!room.is_trigger_tile(Position::new(1, 1)));
        assert_eq!(room.mat_rotation(Position::new(1, 1)), None);
    }

    #[test]
    fn transition_on_plain_tile_is_fatal() {
        let room = hall();
        let err = room.transition_for(Position::new(1, 1)).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "ROOM_NOT_A_TRIGGER");
    }

    #[test]
    fn construction_rejects_out_of_bounds() {
        let mut room = hall();
        assert!(matches!(
            room.set_tile(Position::new(9, 9), TerrainKind::Wall),
            Err(RoomError::OutOfBounds { .. })
        ));
    }
}
