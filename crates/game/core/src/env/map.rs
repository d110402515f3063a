use crate::env::{RoomError, Transition};
use crate::state::{CardinalDirection, Position};

/// Anything that can answer "may a character stand on this tile".
///
/// Implemented by [`crate::Room`] for static terrain and by
/// [`crate::Occupancy`] to layer other characters on top.
pub trait Walkable {
    /// False for out-of-bounds and blocked tiles.
    fn is_walkable(&self, position: Position) -> bool;
}

impl<T: Walkable + ?Sized> Walkable for &T {
    fn is_walkable(&self, position: Position) -> bool {
        (**self).is_walkable(position)
    }
}

/// Static room oracle exposing immutable layout and exit information.
pub trait RoomOracle: Walkable {
    fn dimensions(&self) -> MapDimensions;

    /// True when standing here and facing [`Self::mat_rotation`] leaves the room.
    fn is_trigger_tile(&self, position: Position) -> bool;

    /// Facing required to activate the trigger at `position`.
    fn mat_rotation(&self, position: Position) -> Option<CardinalDirection>;

    /// Exit data of a trigger tile.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::NotATrigger`] (fatal) when `position` is not a
    /// trigger tile. Callers must check [`Self::is_trigger_tile`] first.
    fn transition_for(&self, position: Position) -> Result<&Transition, RoomError>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Row-major index of an in-bounds position.
    pub fn index_of(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_walkable(self) -> bool {
        self.terrain.is_walkable()
    }
}

/// Canonical terrain classes for room tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    /// Tables, beds, bookcases: drawn on the floor but never entered.
    Furniture,
    Void,
}

impl TerrainKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}
