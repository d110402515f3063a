use crate::env::{MapDimensions, RoomError, RoomOracle, Transition, Walkable};
use crate::state::{CardinalDirection, Position};

/// Room layout with other characters' tiles layered on top as obstacles.
///
/// Mirrors the merged tile view used by movement: a tile can be entered only
/// when its terrain is walkable and nobody else is standing on it.
#[derive(Clone, Debug)]
pub struct Occupancy<'a, W: ?Sized> {
    base: &'a W,
    occupied: Vec<Position>,
}

impl<'a, W: ?Sized> Occupancy<'a, W> {
    pub fn new(base: &'a W) -> Self {
        Self {
            base,
            occupied: Vec::new(),
        }
    }

    pub fn with_occupied(base: &'a W, occupied: impl IntoIterator<Item = Position>) -> Self {
        Self {
            base,
            occupied: occupied.into_iter().collect(),
        }
    }

    pub fn block(&mut self, position: Position) {
        self.occupied.push(position);
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupied.contains(&position)
    }

    pub fn base(&self) -> &'a W {
        self.base
    }
}

impl<W: Walkable + ?Sized> Walkable for Occupancy<'_, W> {
    fn is_walkable(&self, position: Position) -> bool {
        self.base.is_walkable(position) && !self.is_occupied(position)
    }
}

impl<W: RoomOracle + ?Sized> RoomOracle for Occupancy<'_, W> {
    fn dimensions(&self) -> MapDimensions {
        self.base.dimensions()
    }

    fn is_trigger_tile(&self, position: Position) -> bool {
        self.base.is_trigger_tile(position)
    }

    fn mat_rotation(&self, position: Position) -> Option<CardinalDirection> {
        self.base.mat_rotation(position)
    }

    fn transition_for(&self, position: Position) -> Result<&Transition, RoomError> {
        self.base.transition_for(position)
    }
}
