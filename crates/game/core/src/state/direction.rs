use crate::state::Position;

/// Facing of a character and the four axes of grid movement.
///
/// Parses case-insensitively from its name, so input layers can map text such
/// as `"north"` straight onto a direction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::South => (0, -1),
            CardinalDirection::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::West => CardinalDirection::East,
        }
    }

    /// Direction to face when standing on `from` and looking at `to`.
    ///
    /// Uses the dominant axis of the displacement; a tie favours the
    /// horizontal axis. Returns `None` when both tiles are the same.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return None;
        }
        let direction = if dx.abs() >= dy.abs() {
            if dx > 0 {
                CardinalDirection::East
            } else {
                CardinalDirection::West
            }
        } else if dy > 0 {
            CardinalDirection::North
        } else {
            CardinalDirection::South
        };
        Some(direction)
    }
}
