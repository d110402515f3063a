use crate::env::Walkable;
use crate::state::Position;

/// Picks the walkable tile next to `goal` that a character at `from` should
/// walk to in order to stand beside it.
///
/// The dominant axis of `from - goal` is the primary axis (x wins ties). On
/// each axis the "near" side is west/south when the signed distance is `<= 0`
/// and east/north otherwise. Candidates are tried as primary-near,
/// secondary-near, secondary-far, primary-far; the first walkable one wins.
/// Returns `None` when all four sides are blocked.
pub fn closest_neighbour<W>(grid: &W, from: Position, goal: Position) -> Option<Position>
where
    W: Walkable + ?Sized,
{
    let walkable = |tile: Position| grid.is_walkable(tile).then_some(tile);

    let north = walkable(Position::new(goal.x, goal.y + 1));
    let east = walkable(Position::new(goal.x + 1, goal.y));
    let south = walkable(Position::new(goal.x, goal.y - 1));
    let west = walkable(Position::new(goal.x - 1, goal.y));

    let x_dist = from.x - goal.x;
    let y_dist = from.y - goal.y;

    let (x_near, x_far) = near_far(x_dist, west, east);
    let (y_near, y_far) = near_far(y_dist, south, north);

    let priority = if x_dist.abs() >= y_dist.abs() {
        [x_near, y_near, y_far, x_far]
    } else {
        [y_near, x_near, x_far, y_far]
    };

    priority.into_iter().flatten().next()
}

/// Orders the two sides of one axis: the low side first when the requester is
/// at or below the goal on that axis.
fn near_far(
    signed_distance: i32,
    low: Option<Position>,
    high: Option<Position>,
) -> (Option<Position>, Option<Position>) {
    if signed_distance <= 0 {
        (low, high)
    } else {
        (high, low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, Room};

    const GOAL: Position = Position::new(2, 2);

    fn open_room() -> Room {
        Room::new("open", MapDimensions::new(5, 5))
    }

    #[test]
    fn single_open_side_always_wins() {
        // Only the tile east of the goal is floor.
        let room = Room::from_ascii("alcove", &["#####", "#####", "###.#", "#####", "#####"])
            .expect("layout");
        for x in -3..8 {
            for y in -3..8 {
                assert_eq!(
                    closest_neighbour(&room, Position::new(x, y), GOAL),
                    Some(Position::new(3, 2)),
                    "requester at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn due_north_approaches_from_north() {
        let room = open_room();
        assert_eq!(
            closest_neighbour(&room, Position::new(2, 4), GOAL),
            Some(Position::new(2, 3))
        );
    }

    #[test]
    fn dominant_axis_decides_side() {
        let room = open_room();
        assert_eq!(
            closest_neighbour(&room, Position::new(0, 3), GOAL),
            Some(Position::new(1, 2)),
            "mostly west"
        );
        assert_eq!(
            closest_neighbour(&room, Position::new(3, 0), GOAL),
            Some(Position::new(2, 1)),
            "mostly south"
        );
        assert_eq!(
            closest_neighbour(&room, Position::new(4, 4), GOAL),
            Some(Position::new(3, 2)),
            "diagonal tie favours x"
        );
    }

    #[test]
    fn falls_back_to_secondary_axis() {
        // West of the goal is blocked; requester is west and slightly north.
        let room = Room::from_ascii("blocked", &[".....", ".....", ".#...", ".....", "....."])
            .expect("layout");
        assert_eq!(
            closest_neighbour(&room, Position::new(0, 3), GOAL),
            Some(Position::new(2, 3))
        );
    }

    #[test]
    fn fully_enclosed_goal_has_no_neighbour() {
        let room = Room::from_ascii("boxed", &[".....", "..#..", ".#.#.", "..#..", "....."])
            .expect("layout");
        assert_eq!(closest_neighbour(&room, Position::new(0, 0), GOAL), None);
    }
}
