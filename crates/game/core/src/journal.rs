use crate::entity::Clue;
use crate::state::ClueId;

/// The detective's notebook: every clue collected so far, in collection order.
///
/// Append-only. Duplicate detection is the caller's job; the world only ever
/// moves a clue here once because collecting removes it from the room.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Journal {
    found: Vec<Clue>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_clue(&mut self, clue: Clue) {
        self.found.push(clue);
    }

    pub fn clues(&self) -> &[Clue] {
        &self.found
    }

    pub fn contains(&self, id: ClueId) -> bool {
        self.found.iter().any(|clue| clue.id() == id)
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}
