use crate::entity::{MoveOutcome, MovementState, Mover, StepOutcome};
use crate::env::{RoomId, Walkable};
use crate::state::{CardinalDirection, DialogueRef, EntityId, Position};

/// A character who may have committed the murder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Suspect {
    id: EntityId,
    name: String,
    description: String,
    dialogue: DialogueRef,
    mover: Mover,
    is_murderer: bool,
    accused: bool,
    /// Cleared while the player is walking over to talk, so the suspect
    /// stays where it was clicked.
    can_move: bool,
}

impl Suspect {
    pub fn new(id: EntityId, name: impl Into<String>, mover: Mover) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            dialogue: DialogueRef::default(),
            mover,
            is_murderer: false,
            accused: false,
            can_move: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_dialogue(mut self, dialogue: DialogueRef) -> Self {
        self.dialogue = dialogue;
        self
    }

    #[must_use]
    pub fn murderer(mut self, is_murderer: bool) -> Self {
        self.is_murderer = is_murderer;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dialogue(&self) -> &DialogueRef {
        &self.dialogue
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn room(&self) -> RoomId {
        self.mover.room()
    }

    pub fn position(&self) -> Position {
        self.mover.position()
    }

    pub fn direction(&self) -> CardinalDirection {
        self.mover.direction()
    }

    pub fn state(&self) -> MovementState {
        self.mover.state()
    }

    pub fn is_walking(&self) -> bool {
        self.mover.is_walking()
    }

    pub fn is_murderer(&self) -> bool {
        self.is_murderer
    }

    pub fn has_been_accused(&self) -> bool {
        self.accused
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Accuses the suspect. Succeeds only against the murderer with enough
    /// evidence; the suspect counts as accused either way.
    pub fn accuse(&mut self, has_evidence: bool) -> bool {
        self.accused = true;
        self.is_murderer && has_evidence
    }

    /// Holds the suspect in place until [`Self::release`].
    pub fn lock(&mut self) {
        self.can_move = false;
    }

    pub fn release(&mut self) {
        self.can_move = true;
    }

    pub fn face(&mut self, direction: CardinalDirection) {
        self.mover.face(direction);
    }

    /// Takes an idle single-tile step, unless locked or already walking.
    pub fn wander<W>(&mut self, direction: CardinalDirection, grid: &W) -> MoveOutcome
    where
        W: Walkable + ?Sized,
    {
        if !self.can_move {
            return MoveOutcome::Ignored;
        }
        self.mover.move_in(direction, grid)
    }

    pub fn step<W>(&mut self, ticks_per_tile: u32, grid: &W) -> StepOutcome
    where
        W: Walkable + ?Sized,
    {
        self.mover.step(ticks_per_tile, grid)
    }
}
