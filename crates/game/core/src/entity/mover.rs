use std::collections::VecDeque;

use crate::env::{RoomId, Walkable};
use crate::nav::find_path;
use crate::state::{CardinalDirection, Position};

/// Whether a mover is between tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementState {
    Standing,
    Walking,
}

/// Result of a directional move command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mover was walking; the command was dropped.
    Ignored,
    /// The way was blocked; the mover now faces the requested direction.
    Turned,
    /// A single-tile move began.
    Started,
    /// The player faced the exit mat it stands on. Only produced by [`crate::Player`].
    RoomChangeRequested,
}

/// Result of advancing a mover by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing pending.
    Idle,
    /// Still travelling toward the next tile.
    InProgress,
    /// Entered a tile; more of the path remains.
    Stepped(Position),
    /// Entered the final tile. Reported exactly once per completed path.
    Arrived(Position),
    /// The route became blocked and no alternative reaches the destination.
    Abandoned,
}

/// Grid movement state machine shared by every character.
///
/// Holds the room, tile, facing and the pending path (front = next tile).
/// The movement state is derived from the path, so a mover is
/// [`MovementState::Walking`] exactly when tiles remain to be entered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mover {
    room: RoomId,
    position: Position,
    direction: CardinalDirection,
    path: VecDeque<Position>,
    progress: u32,
}

impl Mover {
    pub fn new(room: RoomId, position: Position, direction: CardinalDirection) -> Self {
        Self {
            room,
            position,
            direction,
            path: VecDeque::new(),
            progress: 0,
        }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> CardinalDirection {
        self.direction
    }

    pub fn state(&self) -> MovementState {
        if self.path.is_empty() {
            MovementState::Standing
        } else {
            MovementState::Walking
        }
    }

    pub fn is_walking(&self) -> bool {
        self.state() == MovementState::Walking
    }

    pub fn pending_path(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.path.iter().copied()
    }

    /// Final tile of the pending path.
    pub fn destination(&self) -> Option<Position> {
        self.path.back().copied()
    }

    pub fn face(&mut self, direction: CardinalDirection) {
        self.direction = direction;
    }

    /// Turns toward `target`; a no-op when already standing on it.
    pub fn face_towards(&mut self, target: Position) {
        if let Some(direction) = CardinalDirection::between(self.position, target) {
            self.direction = direction;
        }
    }

    /// Starts a single-tile move in `direction`.
    ///
    /// Dropped while walking. Walking into a wall or another character is not
    /// an error: the mover turns in place.
    pub fn move_in<W>(&mut self, direction: CardinalDirection, grid: &W) -> MoveOutcome
    where
        W: Walkable + ?Sized,
    {
        if self.is_walking() {
            return MoveOutcome::Ignored;
        }
        self.direction = direction;
        let target = self.position.offset(direction);
        if !grid.is_walkable(target) {
            return MoveOutcome::Turned;
        }
        self.path.push_back(target);
        self.progress = 0;
        MoveOutcome::Started
    }

    /// Replaces the pending path with a route to `goal`.
    ///
    /// Returns whether there is anywhere to walk. A goal equal to the current
    /// tile, or an unreachable one, leaves the mover standing.
    pub fn walk_to<W>(&mut self, goal: Position, grid: &W) -> bool
    where
        W: Walkable + ?Sized,
    {
        let path = find_path(grid, self.position, goal);
        self.set_path(path)
    }

    /// Installs a precomputed path, interrupting any walk in progress.
    pub fn set_path(&mut self, path: impl IntoIterator<Item = Position>) -> bool {
        self.path = path.into_iter().collect();
        self.progress = 0;
        !self.path.is_empty()
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.progress = 0;
    }

    /// Places the mover in another room (or tile) and stops it.
    pub fn relocate(
        &mut self,
        room: RoomId,
        position: Position,
        direction: Option<CardinalDirection>,
    ) {
        self.clear_path();
        self.room = room;
        self.position = position;
        if let Some(direction) = direction {
            self.direction = direction;
        }
    }

    /// Advances one tick. After `ticks_per_tile` ticks the next tile is entered.
    ///
    /// If the next tile has become blocked the remaining route is replanned to
    /// the same destination; when no route is left the path is dropped and
    /// [`StepOutcome::Abandoned`] is reported instead of an arrival.
    pub fn step<W>(&mut self, ticks_per_tile: u32, grid: &W) -> StepOutcome
    where
        W: Walkable + ?Sized,
    {
        let (Some(mut next), Some(destination)) = (self.path.front().copied(), self.destination())
        else {
            return StepOutcome::Idle;
        };

        self.progress += 1;
        if self.progress < ticks_per_tile.max(1) {
            return StepOutcome::InProgress;
        }
        self.progress = 0;

        if !grid.is_walkable(next) {
            let replanned = find_path(grid, self.position, destination);
            if !self.set_path(replanned) {
                return StepOutcome::Abandoned;
            }
            next = match self.path.front() {
                Some(&tile) => tile,
                None => return StepOutcome::Abandoned,
            };
        }

        self.path.pop_front();
        self.face_towards(next);
        self.position = next;

        if self.path.is_empty() {
            StepOutcome::Arrived(next)
        } else {
            StepOutcome::Stepped(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, Room};
    use crate::nav::Occupancy;

    fn room() -> Room {
        Room::from_ascii("study", &["#####", "#...#", "#...#", "#...#", "#####"]).expect("layout")
    }

    fn mover_at(x: i32, y: i32) -> Mover {
        Mover::new(RoomId(0), Position::new(x, y), CardinalDirection::South)
    }

    fn run_until_settled(mover: &mut Mover, grid: &impl Walkable) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..64 {
            let outcome = mover.step(1, grid);
            if outcome == StepOutcome::Idle {
                break;
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    #[test]
    fn single_tile_move_walks_then_stands() {
        let room = room();
        let mut mover = mover_at(1, 1);
        assert_eq!(mover.move_in(CardinalDirection::North, &room), MoveOutcome::Started);
        assert_eq!(mover.state(), MovementState::Walking);
        assert_eq!(mover.direction(), CardinalDirection::North);

        assert_eq!(mover.step(1, &room), StepOutcome::Arrived(Position::new(1, 2)));
        assert_eq!(mover.position(), Position::new(1, 2));
        assert_eq!(mover.state(), MovementState::Standing);
    }

    #[test]
    fn move_while_walking_is_ignored() {
        let room = room();
        let mut mover = mover_at(1, 1);
        mover.move_in(CardinalDirection::North, &room);
        let before = mover.clone();
        assert_eq!(mover.move_in(CardinalDirection::East, &room), MoveOutcome::Ignored);
        assert_eq!(mover, before);
    }

    #[test]
    fn walking_into_wall_turns_in_place() {
        let room = room();
        let mut mover = mover_at(1, 1);
        assert_eq!(mover.move_in(CardinalDirection::West, &room), MoveOutcome::Turned);
        assert_eq!(mover.position(), Position::new(1, 1));
        assert_eq!(mover.direction(), CardinalDirection::West);
        assert_eq!(mover.state(), MovementState::Standing);
    }

    #[test]
    fn progress_counter_delays_entering_tile() {
        let room = room();
        let mut mover = mover_at(1, 1);
        mover.move_in(CardinalDirection::East, &room);
        assert_eq!(mover.step(3, &room), StepOutcome::InProgress);
        assert_eq!(mover.step(3, &room), StepOutcome::InProgress);
        assert_eq!(mover.position(), Position::new(1, 1));
        assert_eq!(mover.step(3, &room), StepOutcome::Arrived(Position::new(2, 1)));
    }

    #[test]
    fn walk_to_reports_arrival_once() {
        let room = room();
        let mut mover = mover_at(1, 1);
        assert!(mover.walk_to(Position::new(3, 3), &room));
        let outcomes = run_until_settled(&mut mover, &room);
        assert_eq!(outcomes.len(), 4);
        let arrivals = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, StepOutcome::Arrived(_)))
            .count();
        assert_eq!(arrivals, 1);
        assert_eq!(outcomes.last(), Some(&StepOutcome::Arrived(Position::new(3, 3))));
        assert_eq!(mover.step(1, &room), StepOutcome::Idle);
    }

    #[test]
    fn walk_to_current_tile_stays_standing() {
        let room = room();
        let mut mover = mover_at(2, 2);
        assert!(!mover.walk_to(Position::new(2, 2), &room));
        assert_eq!(mover.state(), MovementState::Standing);
        assert_eq!(mover.step(1, &room), StepOutcome::Idle);
    }

    #[test]
    fn new_path_interrupts_current_one() {
        let room = room();
        let mut mover = mover_at(1, 1);
        mover.walk_to(Position::new(3, 3), &room);
        mover.step(1, &room);
        assert!(mover.walk_to(Position::new(1, 1), &room));
        assert_eq!(mover.destination(), Some(Position::new(1, 1)));
    }

    #[test]
    fn blocked_path_is_replanned_to_same_destination() {
        let room = Room::new("open", MapDimensions::new(3, 3));
        let mut mover = mover_at(0, 0);
        mover.set_path([Position::new(1, 0), Position::new(2, 0)]);

        let overlay = Occupancy::with_occupied(&room, [Position::new(1, 0)]);
        let outcomes = run_until_settled(&mut mover, &overlay);
        assert_eq!(mover.position(), Position::new(2, 0));
        assert_eq!(outcomes.last(), Some(&StepOutcome::Arrived(Position::new(2, 0))));
        assert_eq!(outcomes.len(), 4, "detour via the middle row");
    }

    #[test]
    fn unreachable_destination_abandons_path() {
        let room = Room::new("open", MapDimensions::new(3, 1));
        let mut mover = mover_at(0, 0);
        mover.set_path([Position::new(1, 0), Position::new(2, 0)]);
        let overlay = Occupancy::with_occupied(&room, [Position::new(1, 0)]);
        assert_eq!(mover.step(1, &overlay), StepOutcome::Abandoned);
        assert_eq!(mover.state(), MovementState::Standing);
        assert_eq!(mover.position(), Position::new(0, 0));
    }

    #[test]
    fn relocate_stops_and_reorients() {
        let room = room();
        let mut mover = mover_at(1, 1);
        mover.walk_to(Position::new(3, 3), &room);
        mover.relocate(RoomId(4), Position::new(7, 7), Some(CardinalDirection::West));
        assert_eq!(mover.room(), RoomId(4));
        assert_eq!(mover.position(), Position::new(7, 7));
        assert_eq!(mover.direction(), CardinalDirection::West);
        assert_eq!(mover.state(), MovementState::Standing);
    }
}
