use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use arrayvec::ArrayVec;

use crate::env::Walkable;
use crate::state::{CardinalDirection, Position};

/// Finds a shortest 4-connected path from `start` to `goal`.
///
/// The returned tiles begin with the first step after `start` and end with
/// `goal`. The result is empty when `start == goal`, when `goal` is not
/// walkable, or when no route exists; callers that want to approach a blocked
/// tile should pick a goal with [`crate::closest_neighbour`] first.
///
/// Uses a Manhattan heuristic with unit step cost. Open nodes are ordered by
/// `(f, h, y, x, insertion)` so equal-cost searches always yield the same path.
pub fn find_path<W>(grid: &W, start: Position, goal: Position) -> Vec<Position>
where
    W: Walkable + ?Sized,
{
    if start == goal || !grid.is_walkable(goal) {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut closed = HashSet::new();
    let mut best_g: HashMap<Position, u32> = HashMap::new();
    let mut parent: HashMap<Position, Position> = HashMap::new();
    let mut insertion = 0u64;

    best_g.insert(start, 0);
    open.push(Reverse(OpenNode::new(start, 0, goal, insertion)));

    while let Some(Reverse(current)) = open.pop() {
        if !closed.insert(current.position) {
            continue;
        }
        if current.position == goal {
            return reconstruct(&parent, start, goal);
        }

        for neighbour in walkable_neighbours(grid, current.position) {
            if closed.contains(&neighbour) {
                continue;
            }
            let tentative_g = current.g + 1;
            if best_g
                .get(&neighbour)
                .is_some_and(|&known| tentative_g >= known)
            {
                continue;
            }
            best_g.insert(neighbour, tentative_g);
            parent.insert(neighbour, current.position);
            insertion += 1;
            open.push(Reverse(OpenNode::new(neighbour, tentative_g, goal, insertion)));
        }
    }

    Vec::new()
}

fn walkable_neighbours<W>(grid: &W, at: Position) -> ArrayVec<Position, 4>
where
    W: Walkable + ?Sized,
{
    CardinalDirection::ALL
        .into_iter()
        .map(|direction| at.offset(direction))
        .filter(|candidate| grid.is_walkable(*candidate))
        .collect()
}

fn reconstruct(
    parent: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&previous) = parent.get(&cursor) {
        if previous == start {
            break;
        }
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}

/// Frontier entry. Field order is the heap order: lowest `f`, then lowest `h`,
/// then row, column and insertion as deterministic tie-breakers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
    insertion: u64,
    g: u32,
    position: Position,
}

impl OpenNode {
    fn new(position: Position, g: u32, goal: Position, insertion: u64) -> Self {
        let h = position.manhattan(goal);
        Self {
            f: g + h,
            h,
            y: position.y,
            x: position.x,
            insertion,
            g,
            position,
        }
    }
}
