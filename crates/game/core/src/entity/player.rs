use crate::entity::{Clue, MoveOutcome, MovementState, Mover, StepOutcome, Suspect};
use crate::env::{RoomError, RoomId, RoomOracle, Rooms, Transition, Walkable};
use crate::event::{EventSink, GameEvent};
use crate::nav::closest_neighbour;
use crate::state::{CardinalDirection, ClueId, EntityId, Position};

/// What a tile click turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Walking up to a suspect; `arrived` when already standing beside it.
    Talk { suspect: EntityId, arrived: bool },
    /// Walking up to a clue; `arrived` when already in place.
    Collect { clue: ClueId, arrived: bool },
    /// Plain walk to a floor tile.
    Walk { destination: Position },
    /// Nothing to do (blocked tile, unreachable goal).
    None,
}

/// The detective: a [`Mover`] plus deferred on-arrival intents.
///
/// `talk_target` and `collect_target` are cleared at the start of every
/// interaction request and consumed exactly once when the path runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
    mover: Mover,
    talk_target: Option<EntityId>,
    collect_target: Option<ClueId>,
    room_change_requested: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, mover: Mover) -> Self {
        Self {
            name: name.into(),
            mover,
            talk_target: None,
            collect_target: None,
            room_change_requested: false,
        }
    }

    pub fn id(&self) -> EntityId {
        EntityId::PLAYER
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn talk_target(&self) -> Option<EntityId> {
        self.talk_target
    }

    pub fn collect_target(&self) -> Option<ClueId> {
        self.collect_target
    }

    /// Polled by the game-state layer every frame.
    pub fn room_change_requested(&self) -> bool {
        self.room_change_requested
    }

    /// True when standing on an exit mat.
    pub fn is_on_trigger_tile<R>(&self, room: &R) -> bool
    where
        R: RoomOracle + ?Sized,
    {
        room.is_trigger_tile(self.position())
    }

    /// Directional input.
    ///
    /// Facing the mat direction while standing on an exit requests a room
    /// change instead of moving. Otherwise behaves like [`Mover::move_in`].
    pub fn move_in<R>(&mut self, direction: CardinalDirection, room: &R) -> MoveOutcome
    where
        R: RoomOracle + ?Sized,
    {
        if self.mover.is_walking() {
            return MoveOutcome::Ignored;
        }
        let here = self.position();
        if room.is_trigger_tile(here) && room.mat_rotation(here) == Some(direction) {
            self.room_change_requested = true;
            return MoveOutcome::RoomChangeRequested;
        }
        self.mover.move_in(direction, room)
    }

    /// Tile-click input.
    ///
    /// `grid` must already treat other characters' tiles as blocked. Suspects
    /// and clues outside the player's room are ignored. In order:
    /// 1. a standing suspect on `target`: walk beside it, lock it, remember it;
    /// 2. a clue on `target`: walk beside it and remember it, then carry on;
    /// 3. an unwalkable `target`: stop;
    /// 4. walk straight to `target` (which replaces a clue approach when the
    ///    clue lies on open floor).
    pub fn interact<W>(
        &mut self,
        target: Position,
        grid: &W,
        suspects: &mut [Suspect],
        clues: &[Clue],
    ) -> Interaction
    where
        W: Walkable + ?Sized,
    {
        self.clear_intents(suspects);

        let room = self.room();
        let here = self.position();

        for suspect in suspects.iter_mut() {
            if suspect.room() != room || suspect.position() != target || suspect.is_walking() {
                continue;
            }
            let Some(approach) = closest_neighbour(grid, here, target) else {
                continue;
            };
            let walking = self.mover.walk_to(approach, grid);
            let arrived = approach == here;
            if walking || arrived {
                suspect.lock();
                self.talk_target = Some(suspect.id());
                return Interaction::Talk {
                    suspect: suspect.id(),
                    arrived,
                };
            }
        }

        let mut goal = None;
        let mut clicked_clue = None;
        for clue in clues {
            if clue.room() != room || clue.position() != target {
                continue;
            }
            if let Some(approach) = closest_neighbour(grid, here, target) {
                self.mover.walk_to(approach, grid);
                goal = Some(approach);
            }
            clicked_clue = Some(clue.id());
        }

        if grid.is_walkable(target) {
            self.mover.walk_to(target, grid);
            goal = Some(target);
        }

        let arrived = !self.mover.is_walking() && goal == Some(here);
        // A clue with no route to it is not worth remembering.
        if self.mover.is_walking() || arrived {
            self.collect_target = clicked_clue;
        }
        match self.collect_target {
            Some(clue) => Interaction::Collect { clue, arrived },
            None if self.mover.is_walking() => Interaction::Walk {
                destination: target,
            },
            None => Interaction::None,
        }
    }

    /// Advances the embedded mover one tick.
    pub fn step<W>(&mut self, ticks_per_tile: u32, grid: &W) -> StepOutcome
    where
        W: Walkable + ?Sized,
    {
        self.mover.step(ticks_per_tile, grid)
    }

    /// Resolves on-arrival intents once the path has run out.
    ///
    /// A talk target turns both characters to face each other and requests an
    /// interview; a collect target turns the player toward the clue and
    /// reports that it was reached.
    pub fn finish_move(
        &mut self,
        suspects: &mut [Suspect],
        clues: &[Clue],
        sink: &mut impl EventSink,
    ) {
        if self.mover.is_walking() {
            return;
        }

        if let Some(id) = self.talk_target.take()
            && let Some(suspect) = suspects.iter_mut().find(|suspect| suspect.id() == id)
        {
            self.mover.face_towards(suspect.position());
            suspect.face(self.direction().opposite());
            sink.emit(GameEvent::InterviewRequested { suspect: id });
        }

        if let Some(id) = self.collect_target.take()
            && let Some(clue) = clues.iter().find(|clue| clue.id() == id)
        {
            self.mover.face_towards(clue.position());
            sink.emit(GameEvent::ClueReached { clue: id });
        }
    }

    /// Resolves a completed walk.
    ///
    /// Pending intents fire first (see [`Player::finish_move`]). Without one,
    /// stopping on an exit mat while facing its direction requests a room
    /// change, exactly as turning to face it would.
    pub fn arrive<R>(
        &mut self,
        room: &R,
        suspects: &mut [Suspect],
        clues: &[Clue],
        sink: &mut impl EventSink,
    ) where
        R: RoomOracle + ?Sized,
    {
        if self.talk_target.is_some() || self.collect_target.is_some() {
            self.finish_move(suspects, clues, sink);
            return;
        }
        let here = self.position();
        if room.is_trigger_tile(here) && room.mat_rotation(here) == Some(self.direction()) {
            self.room_change_requested = true;
            sink.emit(GameEvent::RoomChangeRequested {
                room: self.room(),
                position: here,
            });
        }
    }

    /// Drops both intents, unlocking a suspect that was waiting to be talked to.
    pub fn clear_intents(&mut self, suspects: &mut [Suspect]) {
        if let Some(id) = self.talk_target.take()
            && let Some(suspect) = suspects.iter_mut().find(|suspect| suspect.id() == id)
        {
            suspect.release();
        }
        self.collect_target = None;
    }

    /// Carries out a pending room change.
    ///
    /// Only acts when the room-change flag is set and the player stands on a
    /// trigger tile; the flag is cleared either way. Returns the transition
    /// taken. This is the only way the player's room changes.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::UnknownRoom`] if the player's room or the
    /// transition's destination is missing from `rooms`.
    pub fn move_room(&mut self, rooms: &Rooms) -> Result<Option<Transition>, RoomError> {
        if !std::mem::take(&mut self.room_change_requested) {
            return Ok(None);
        }
        let room = rooms.get(self.room())?;
        if !self.is_on_trigger_tile(room) {
            return Ok(None);
        }
        let transition = *room.transition_for(self.position())?;
        if !rooms.contains(transition.destination_room) {
            return Err(RoomError::UnknownRoom(transition.destination_room));
        }
        self.mover.relocate(
            transition.destination_room,
            transition.destination_position,
            transition.destination_direction,
        );
        Ok(Some(transition))
    }
}
