//! The authoritative world aggregate.
//!
//! [`World`] owns the room arena, every character, the available clues and the
//! journal, and is the only place where entities are stepped. Each mover sees
//! its room through an [`Occupancy`] overlay that blocks the tiles other
//! characters stand on or are about to enter.

use crate::config::GameConfig;
use crate::entity::{Clue, Interaction, MoveOutcome, Player, StepOutcome, Suspect};
use crate::env::{PcgRng, RngOracle, Room, RoomError, RoomId, Rooms, compute_seed};
use crate::error::{ErrorSeverity, GameError};
use crate::event::{EventSink, GameEvent};
use crate::journal::Journal;
use crate::nav::Occupancy;
use crate::state::{CardinalDirection, ClueId, EntityId, Position, Tick};

/// Errors raised by world-level operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error(transparent)]
    Room(#[from] RoomError),

    #[error("suspect {0} not found")]
    UnknownSuspect(EntityId),

    #[error("{0} is not available")]
    UnknownClue(ClueId),

    #[error("entity id {0} is used more than once")]
    DuplicateEntity(EntityId),

    #[error("clue id {0} is used more than once")]
    DuplicateClue(ClueId),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WorldError::Room(err) => err.severity(),
            WorldError::UnknownSuspect(_)
            | WorldError::UnknownClue(_)
            | WorldError::DuplicateEntity(_)
            | WorldError::DuplicateClue(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WorldError::Room(err) => err.error_code(),
            WorldError::UnknownSuspect(_) => "WORLD_UNKNOWN_SUSPECT",
            WorldError::UnknownClue(_) => "WORLD_UNKNOWN_CLUE",
            WorldError::DuplicateEntity(_) => "WORLD_DUPLICATE_ENTITY",
            WorldError::DuplicateClue(_) => "WORLD_DUPLICATE_CLUE",
        }
    }
}

/// Context values for [`compute_seed`] when suspects wander.
const WANDER_ROLL: u32 = 0;
const WANDER_DIRECTION: u32 = 1;

pub struct World {
    config: GameConfig,
    rooms: Rooms,
    player: Player,
    suspects: Vec<Suspect>,
    clues: Vec<Clue>,
    journal: Journal,
    rng: PcgRng,
    game_seed: u64,
    tick: Tick,
}

impl World {
    /// Assembles a world, checking that every room reference resolves and
    /// that ids are unique.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Room`] for a dangling room id and
    /// `Duplicate*` variants for repeated ids.
    pub fn new(
        config: GameConfig,
        rooms: Rooms,
        player: Player,
        suspects: Vec<Suspect>,
        clues: Vec<Clue>,
    ) -> Result<Self, WorldError> {
        rooms.get(player.room())?;

        let mut seen = vec![EntityId::PLAYER];
        for suspect in &suspects {
            rooms.get(suspect.room())?;
            if seen.contains(&suspect.id()) {
                return Err(WorldError::DuplicateEntity(suspect.id()));
            }
            seen.push(suspect.id());
        }

        let mut seen_clues = Vec::with_capacity(clues.len());
        for clue in &clues {
            rooms.get(clue.room())?;
            if seen_clues.contains(&clue.id()) {
                return Err(WorldError::DuplicateClue(clue.id()));
            }
            seen_clues.push(clue.id());
        }

        Ok(Self {
            config,
            rooms,
            player,
            suspects,
            clues,
            journal: Journal::new(),
            rng: PcgRng,
            game_seed: 0,
            tick: Tick::ZERO,
        })
    }

    /// Sets the seed that drives suspect wandering.
    #[must_use]
    pub fn with_seed(mut self, game_seed: u64) -> Self {
        self.game_seed = game_seed;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rooms(&self) -> &Rooms {
        &self.rooms
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.suspects
    }

    pub fn suspect(&self, id: EntityId) -> Option<&Suspect> {
        self.suspects.iter().find(|suspect| suspect.id() == id)
    }

    /// Case-insensitive lookup by name.
    pub fn suspect_by_name(&self, name: &str) -> Option<&Suspect> {
        self.suspects
            .iter()
            .find(|suspect| suspect.name().eq_ignore_ascii_case(name))
    }

    /// Clues still lying around in any room.
    pub fn available_clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn clues_in(&self, room: RoomId) -> impl Iterator<Item = &Clue> {
        self.clues.iter().filter(move |clue| clue.room() == room)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// The room the player is in.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::UnknownRoom`] if the player's room id is dangling.
    pub fn current_room(&self) -> Result<&Room, WorldError> {
        Ok(self.rooms.get(self.player.room())?)
    }

    /// Directional input for the player. A move or turn drops any pending
    /// talk or collect intent.
    ///
    /// # Errors
    ///
    /// Fails only if the player's room id is dangling.
    pub fn move_player(
        &mut self,
        direction: CardinalDirection,
        sink: &mut impl EventSink,
    ) -> Result<MoveOutcome, WorldError> {
        let occupied = self.occupied_tiles(self.player.room(), EntityId::PLAYER);
        let room = self.rooms.get(self.player.room())?;
        let grid = Occupancy::with_occupied(room, occupied);

        let outcome = self.player.move_in(direction, &grid);
        match outcome {
            MoveOutcome::RoomChangeRequested => sink.emit(GameEvent::RoomChangeRequested {
                room: self.player.room(),
                position: self.player.position(),
            }),
            MoveOutcome::Started | MoveOutcome::Turned => {
                self.player.clear_intents(&mut self.suspects);
            }
            MoveOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Tile-click input for the player. When the player is already in place
    /// the on-arrival intent fires immediately.
    ///
    /// # Errors
    ///
    /// Fails only if the player's room id is dangling.
    pub fn interact(
        &mut self,
        target: Position,
        sink: &mut impl EventSink,
    ) -> Result<Interaction, WorldError> {
        let occupied = self.occupied_tiles(self.player.room(), EntityId::PLAYER);
        let room = self.rooms.get(self.player.room())?;
        let grid = Occupancy::with_occupied(room, occupied);

        let interaction = self
            .player
            .interact(target, &grid, &mut self.suspects, &self.clues);
        if matches!(
            interaction,
            Interaction::Talk { arrived: true, .. } | Interaction::Collect { arrived: true, .. }
        ) {
            self.player
                .finish_move(&mut self.suspects, &self.clues, sink);
        }
        Ok(interaction)
    }

    /// Advances the simulation by one tick: the player first, then every
    /// suspect in id order.
    ///
    /// # Errors
    ///
    /// Fails only if a character's room id is dangling.
    pub fn tick(&mut self, sink: &mut impl EventSink) -> Result<(), WorldError> {
        self.tick = self.tick.next();
        let ticks_per_tile = self.config.step_ticks();

        let occupied = self.occupied_tiles(self.player.room(), EntityId::PLAYER);
        let room = self.rooms.get(self.player.room())?;
        let grid = Occupancy::with_occupied(room, occupied);
        match self.player.step(ticks_per_tile, &grid) {
            StepOutcome::Arrived(_) => {
                self.player
                    .arrive(&grid, &mut self.suspects, &self.clues, sink);
            }
            StepOutcome::Abandoned => self.player.clear_intents(&mut self.suspects),
            StepOutcome::Idle | StepOutcome::InProgress | StepOutcome::Stepped(_) => {}
        }

        for index in 0..self.suspects.len() {
            let (id, room_id) = {
                let suspect = &self.suspects[index];
                (suspect.id(), suspect.room())
            };
            let wander = self.roll_wander(id);
            let occupied = self.occupied_tiles(room_id, id);
            let room = self.rooms.get(room_id)?;
            let grid = Occupancy::with_occupied(room, occupied);

            let suspect = &mut self.suspects[index];
            if let Some(direction) = wander
                && suspect.can_move()
                && !suspect.is_walking()
            {
                suspect.wander(direction, &grid);
            }
            suspect.step(ticks_per_tile, &grid);
        }
        Ok(())
    }

    /// Performs a requested room change for the player.
    ///
    /// Returns whether the player moved. Pending intents are dropped.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`RoomError::NotATrigger`] or [`RoomError::UnknownRoom`]
    /// when the room data and the player disagree.
    pub fn move_room(&mut self, sink: &mut impl EventSink) -> Result<bool, WorldError> {
        let from = self.player.room();
        let Some(transition) = self.player.move_room(&self.rooms)? else {
            return Ok(false);
        };
        self.player.clear_intents(&mut self.suspects);
        sink.emit(GameEvent::RoomChanged {
            from,
            to: transition.destination_room,
            position: transition.destination_position,
        });
        Ok(true)
    }

    /// Moves an available clue into the journal.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownClue`] if the clue was already collected
    /// or never existed.
    pub fn collect_clue(
        &mut self,
        id: ClueId,
        sink: &mut impl EventSink,
    ) -> Result<(), WorldError> {
        let index = self
            .clues
            .iter()
            .position(|clue| clue.id() == id)
            .ok_or(WorldError::UnknownClue(id))?;
        let clue = self.clues.remove(index);
        self.journal.add_clue(clue);
        sink.emit(GameEvent::ClueCollected { clue: id });
        Ok(())
    }

    /// Accuses a suspect. Evidence counts as sufficient once the journal holds
    /// `min_clues_for_accusation` clues.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownSuspect`] for an unknown id.
    pub fn accuse(
        &mut self,
        id: EntityId,
        sink: &mut impl EventSink,
    ) -> Result<bool, WorldError> {
        let has_evidence = self.journal.len() >= self.config.min_clues_for_accusation;
        let suspect = self.suspect_mut(id)?;
        let correct = suspect.accuse(has_evidence);
        sink.emit(GameEvent::SuspectAccused {
            suspect: id,
            correct,
        });
        Ok(correct)
    }

    /// Lets a suspect walk around again after a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownSuspect`] for an unknown id.
    pub fn end_interview(&mut self, id: EntityId) -> Result<(), WorldError> {
        self.suspect_mut(id)?.release();
        Ok(())
    }

    fn suspect_mut(&mut self, id: EntityId) -> Result<&mut Suspect, WorldError> {
        self.suspects
            .iter_mut()
            .find(|suspect| suspect.id() == id)
            .ok_or(WorldError::UnknownSuspect(id))
    }

    /// Tiles in `room` held or about to be entered by anyone except `except`.
    fn occupied_tiles(&self, room: RoomId, except: EntityId) -> Vec<Position> {
        let player = (!except.is_player() && self.player.room() == room)
            .then_some(self.player.mover());
        let suspects = self
            .suspects
            .iter()
            .filter(|suspect| suspect.id() != except && suspect.room() == room)
            .map(Suspect::mover);

        player
            .into_iter()
            .chain(suspects)
            .flat_map(|mover| {
                std::iter::once(mover.position()).chain(mover.pending_path().next())
            })
            .collect()
    }

    fn roll_wander(&self, id: EntityId) -> Option<CardinalDirection> {
        if self.config.wander_chance == 0 {
            return None;
        }
        let roll_seed = compute_seed(self.game_seed, self.tick.0, id.0, WANDER_ROLL);
        if self.rng.roll_d100(roll_seed) > self.config.wander_chance {
            return None;
        }
        let direction_seed = compute_seed(self.game_seed, self.tick.0, id.0, WANDER_DIRECTION);
        let index = self.rng.range(direction_seed, 0, 3) as usize;
        CardinalDirection::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{MovementState, Mover};
    use crate::env::{Transition, Trigger};

    const HALL: RoomId = RoomId(0);
    const STUDY: RoomId = RoomId(1);
    const BUTLER: EntityId = EntityId(1);
    const COOK: EntityId = EntityId(2);

    fn rooms() -> Rooms {
        let mut rooms = Rooms::new();
        let mut hall = Room::from_ascii(
            "hall",
            &[
                "########", "#......#", "#......#", "#......#", "#......#", "########",
            ],
        )
        .expect("layout");
        hall.add_trigger(
            Position::new(6, 2),
            Trigger {
                facing: CardinalDirection::East,
                transition: Transition {
                    destination_room: STUDY,
                    destination_position: Position::new(1, 2),
                    destination_direction: Some(CardinalDirection::East),
                },
            },
        )
        .expect("in bounds");
        rooms.push(hall);
        rooms.push(
            Room::from_ascii("study", &["#####", "#...#", "#...#", "#...#", "#####"])
                .expect("layout"),
        );
        rooms
    }

    fn world(config: GameConfig) -> World {
        let player = Player::new(
            "Detective",
            Mover::new(HALL, Position::new(1, 1), CardinalDirection::North),
        );
        let suspects = vec![
            Suspect::new(
                BUTLER,
                "Butler",
                Mover::new(HALL, Position::new(5, 4), CardinalDirection::South),
            )
            .murderer(true),
            Suspect::new(
                COOK,
                "Cook",
                Mover::new(STUDY, Position::new(3, 3), CardinalDirection::South),
            ),
        ];
        let clues = vec![
            Clue::new(ClueId(1), "Candlestick", HALL, Position::new(3, 1)),
            Clue::new(ClueId(2), "Letter", STUDY, Position::new(2, 2)),
        ];
        World::new(config, rooms(), player, suspects, clues).expect("valid world")
    }

    fn run(world: &mut World, ticks: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            world.tick(&mut events).expect("tick");
        }
        events
    }

    #[test]
    fn rejects_dangling_rooms_and_duplicate_ids() {
        let player = Player::new(
            "P",
            Mover::new(RoomId(9), Position::ORIGIN, CardinalDirection::North),
        );
        let err = World::new(GameConfig::still(), rooms(), player, vec![], vec![]).err();
        assert_eq!(err, Some(WorldError::Room(RoomError::UnknownRoom(RoomId(9)))));

        let player = Player::new(
            "P",
            Mover::new(HALL, Position::new(1, 1), CardinalDirection::North),
        );
        let twin = |id| {
            Suspect::new(
                id,
                "Twin",
                Mover::new(HALL, Position::new(2, 2), CardinalDirection::North),
            )
        };
        let err = World::new(
            GameConfig::still(),
            rooms(),
            player,
            vec![twin(EntityId(3)), twin(EntityId(3))],
            vec![],
        )
        .err();
        assert_eq!(err, Some(WorldError::DuplicateEntity(EntityId(3))));
    }

    #[test]
    fn clicking_a_clue_leads_to_collection() {
        let mut world = world(GameConfig::still());
        let mut events = Vec::new();
        let interaction = world.interact(Position::new(3, 1), &mut events).unwrap();
        assert!(matches!(interaction, Interaction::Collect { clue: ClueId(1), .. }));

        events.extend(run(&mut world, 4));
        assert_eq!(events, vec![GameEvent::ClueReached { clue: ClueId(1) }]);

        world.collect_clue(ClueId(1), &mut events).unwrap();
        assert_eq!(world.journal().len(), 1);
        assert_eq!(world.clues_in(HALL).count(), 0);
        assert_eq!(
            world.collect_clue(ClueId(1), &mut events),
            Err(WorldError::UnknownClue(ClueId(1)))
        );
    }

    #[test]
    fn clicking_a_suspect_requests_an_interview() {
        let mut world = world(GameConfig::still());
        let mut events = Vec::new();
        world.interact(Position::new(5, 4), &mut events).unwrap();
        assert!(!world.suspect(BUTLER).unwrap().can_move());

        events.extend(run(&mut world, 12));
        assert_eq!(events, vec![GameEvent::InterviewRequested { suspect: BUTLER }]);
        let player = world.player();
        let butler = world.suspect(BUTLER).unwrap();
        assert_eq!(player.position().manhattan(butler.position()), 1);
        assert_eq!(player.direction().opposite(), butler.direction());

        world.end_interview(BUTLER).unwrap();
        assert!(world.suspect(BUTLER).unwrap().can_move());
    }

    #[test]
    fn player_cannot_walk_through_a_suspect() {
        let mut world = world(GameConfig::still());
        let mut events = Vec::new();
        world.interact(Position::new(5, 3), &mut events).unwrap();
        run(&mut world, 12);
        assert_eq!(world.player().position(), Position::new(5, 3));
        // The butler stands directly north.
        let outcome = world
            .move_player(CardinalDirection::North, &mut events)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Turned);
        assert_eq!(world.player().position(), Position::new(5, 3));
    }

    #[test]
    fn exit_mat_moves_player_to_next_room() {
        let mut world = world(GameConfig::still());
        let mut events = Vec::new();
        world.interact(Position::new(6, 1), &mut events).unwrap();
        run(&mut world, 12);
        // Stepping onto the mat from the south does not leave the room.
        world
            .move_player(CardinalDirection::North, &mut events)
            .unwrap();
        run(&mut world, 2);
        assert_eq!(world.player().position(), Position::new(6, 2));
        assert_eq!(world.player().state(), MovementState::Standing);
        assert!(!world.player().room_change_requested());
        assert!(events.is_empty());

        let outcome = world
            .move_player(CardinalDirection::East, &mut events)
            .unwrap();
        assert_eq!(outcome, MoveOutcome::RoomChangeRequested);
        assert!(world.player().room_change_requested());

        assert!(world.move_room(&mut events).unwrap());
        assert_eq!(world.player().room(), STUDY);
        assert_eq!(world.player().position(), Position::new(1, 2));
        assert_eq!(world.player().direction(), CardinalDirection::East);
        assert_eq!(world.current_room().unwrap().name(), "study");
        assert_eq!(
            events,
            vec![
                GameEvent::RoomChangeRequested {
                    room: HALL,
                    position: Position::new(6, 2)
                },
                GameEvent::RoomChanged {
                    from: HALL,
                    to: STUDY,
                    position: Position::new(1, 2)
                },
            ]
        );
        assert!(!world.move_room(&mut events).unwrap());
    }

    #[test]
    fn walking_onto_mat_facing_its_way_requests_room_change() {
        let mut world = world(GameConfig::still());
        let mut events = Vec::new();
        world.interact(Position::new(5, 2), &mut events).unwrap();
        run(&mut world, 12);
        assert!(events.is_empty());

        world
            .move_player(CardinalDirection::East, &mut events)
            .unwrap();
        events.extend(run(&mut world, 2));
        assert!(world.player().room_change_requested());
        assert_eq!(
            events,
            vec![GameEvent::RoomChangeRequested {
                room: HALL,
                position: Position::new(6, 2)
            }]
        );
        assert!(world.move_room(&mut events).unwrap());
        assert_eq!(world.player().room(), STUDY);
    }

    #[test]
    fn unreachable_clue_is_never_reached() {
        let mut rooms = Rooms::new();
        rooms.push(Room::from_ascii("cellar", &["#######", "#..#T.#", "#######"]).unwrap());
        let player = Player::new(
            "Detective",
            Mover::new(HALL, Position::new(1, 1), CardinalDirection::North),
        );
        let clues = vec![Clue::new(ClueId(9), "Ledger", HALL, Position::new(4, 1))];
        let mut world = World::new(GameConfig::still(), rooms, player, vec![], clues).unwrap();
        let mut events = Vec::new();

        let interaction = world.interact(Position::new(4, 1), &mut events).unwrap();
        assert_eq!(interaction, Interaction::None);
        world
            .move_player(CardinalDirection::East, &mut events)
            .unwrap();
        events.extend(run(&mut world, 2));
        assert_eq!(world.player().position(), Position::new(2, 1));
        assert!(events.is_empty());
    }

    #[test]
    fn accusation_needs_enough_clues() {
        let config = GameConfig {
            min_clues_for_accusation: 1,
            ..GameConfig::still()
        };
        let mut world = world(config);
        let mut events = Vec::new();
        assert!(!world.accuse(BUTLER, &mut events).unwrap());
        assert!(world.suspect(BUTLER).unwrap().has_been_accused());

        world.collect_clue(ClueId(2), &mut events).unwrap();
        assert!(world.accuse(BUTLER, &mut events).unwrap());
        assert!(!world.accuse(COOK, &mut events).unwrap());
        assert_eq!(
            world.accuse(EntityId(77), &mut events),
            Err(WorldError::UnknownSuspect(EntityId(77)))
        );
    }

    #[test]
    fn wandering_is_deterministic_per_seed() {
        let config = GameConfig {
            wander_chance: 50,
            ..GameConfig::still()
        };
        let positions = |seed| {
            let mut world = world(config.clone()).with_seed(seed);
            run(&mut world, 40);
            world
                .suspects()
                .iter()
                .map(Suspect::position)
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(7), positions(7));
    }

    #[test]
    fn locked_suspect_stays_put_while_player_approaches() {
        let config = GameConfig {
            wander_chance: 100,
            ticks_per_tile: 2,
            ..GameConfig::new()
        };
        let mut world = world(config);
        let mut events = Vec::new();
        world.interact(Position::new(5, 4), &mut events).unwrap();
        for _ in 0..30 {
            world.tick(&mut events).unwrap();
            if !events.is_empty() {
                break;
            }
        }
        assert_eq!(world.suspect(BUTLER).unwrap().position(), Position::new(5, 4));
        assert_eq!(events, vec![GameEvent::InterviewRequested { suspect: BUTLER }]);
    }
}
