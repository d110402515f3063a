//! The game-state controller.
//!
//! A [`Session`] turns player commands into world operations, reacts to the
//! events the world raises (collecting reached clues, performing requested
//! room changes, entering interviews) and publishes every event on the bus.

use std::collections::VecDeque;
use std::fmt;

use mystery_core::{
    CardinalDirection, EntityId, GameEvent, Interaction, MoveOutcome, MovementState, Position,
    Suspect, Tick, World,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, PhaseEvent, Topic};

/// Where the investigation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Free movement; every command is accepted.
    Exploring,
    /// Talking to a suspect; movement and clicks wait until the interview ends.
    Interviewing { suspect: EntityId },
    /// The murderer was accused with enough evidence.
    Solved { murderer: EntityId },
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Exploring => f.write_str("exploring"),
            GamePhase::Interviewing { suspect } => write!(f, "interviewing {}", suspect),
            GamePhase::Solved { .. } => f.write_str("solved"),
        }
    }
}

/// Player input accepted by [`Session::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(CardinalDirection),
    Click(Position),
    Tick(u32),
    EndInterview,
    Accuse(String),
}

/// What a successfully executed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved(MoveOutcome),
    Interacted(Interaction),
    Ticked(u32),
    InterviewEnded(EntityId),
    Accused { suspect: EntityId, correct: bool },
}

/// A serializable snapshot for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub clock: Tick,
    pub phase: GamePhase,
    pub room: String,
    pub position: Position,
    pub facing: CardinalDirection,
    pub state: MovementState,
    pub journal: Vec<String>,
    pub clues_here: Vec<(String, Position)>,
    pub suspects_here: Vec<SuspectStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspectStatus {
    pub name: String,
    pub position: Position,
    pub accused: bool,
}

pub struct Session {
    world: World,
    bus: EventBus,
    phase: GamePhase,
}

impl Session {
    pub fn new(world: World, bus: EventBus) -> Self {
        Self {
            world,
            bus,
            phase: GamePhase::Exploring,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Runs one command and resolves every event it causes.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::Solved`] once the case is closed
    /// - [`RuntimeError::Busy`] for movement or clicks during an interview
    /// - [`RuntimeError::NotInterviewing`] for a stray `EndInterview`
    /// - [`RuntimeError::UnknownSuspect`] for an accusation with no match
    /// - [`RuntimeError::World`] if room data and entities disagree
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        tracing::debug!(?command, phase = %self.phase, "executing command");
        let result = self.run(command);
        if let Err(err) = &result {
            tracing::warn!(error = %err, severity = %err.severity(), "command rejected");
        }
        result
    }

    fn run(&mut self, command: Command) -> Result<CommandOutcome> {
        if matches!(self.phase, GamePhase::Solved { .. }) {
            return Err(RuntimeError::Solved);
        }

        match command {
            Command::Move(direction) => {
                self.ensure_exploring()?;
                let mut pending = Vec::new();
                let outcome = self.world.move_player(direction, &mut pending)?;
                self.dispatch(pending)?;
                Ok(CommandOutcome::Moved(outcome))
            }
            Command::Click(target) => {
                self.ensure_exploring()?;
                let mut pending = Vec::new();
                let interaction = self.world.interact(target, &mut pending)?;
                self.dispatch(pending)?;
                Ok(CommandOutcome::Interacted(interaction))
            }
            Command::Tick(count) => {
                for _ in 0..count {
                    let mut pending = Vec::new();
                    self.world.tick(&mut pending)?;
                    self.dispatch(pending)?;
                }
                tracing::trace!(clock = %self.world.tick_count(), "ticked {}", count);
                Ok(CommandOutcome::Ticked(count))
            }
            Command::EndInterview => {
                let GamePhase::Interviewing { suspect } = self.phase else {
                    return Err(RuntimeError::NotInterviewing);
                };
                self.world.end_interview(suspect)?;
                self.set_phase(GamePhase::Exploring);
                Ok(CommandOutcome::InterviewEnded(suspect))
            }
            Command::Accuse(name) => {
                let suspect = self
                    .world
                    .suspect_by_name(&name)
                    .map(Suspect::id)
                    .ok_or(RuntimeError::UnknownSuspect(name))?;
                let mut pending = Vec::new();
                let correct = self.world.accuse(suspect, &mut pending)?;
                self.dispatch(pending)?;
                Ok(CommandOutcome::Accused { suspect, correct })
            }
        }
    }

    /// Snapshot of what the player can currently see.
    ///
    /// # Errors
    ///
    /// Fails only if the player's room id is dangling.
    pub fn status(&self) -> Result<SessionStatus> {
        let player = self.world.player();
        let room = self.world.current_room()?;
        Ok(SessionStatus {
            clock: self.world.tick_count(),
            phase: self.phase,
            room: room.name().to_string(),
            position: player.position(),
            facing: player.direction(),
            state: player.state(),
            journal: self
                .world
                .journal()
                .clues()
                .iter()
                .map(|clue| clue.name().to_string())
                .collect(),
            clues_here: self
                .world
                .clues_in(room.id())
                .map(|clue| (clue.name().to_string(), clue.position()))
                .collect(),
            suspects_here: self
                .world
                .suspects()
                .iter()
                .filter(|suspect| suspect.room() == room.id())
                .map(|suspect| SuspectStatus {
                    name: suspect.name().to_string(),
                    position: suspect.position(),
                    accused: suspect.has_been_accused(),
                })
                .collect(),
        })
    }

    fn ensure_exploring(&self) -> Result<()> {
        match self.phase {
            GamePhase::Exploring => Ok(()),
            phase => Err(RuntimeError::Busy { phase }),
        }
    }

    /// Publishes events in order, reacting to each before the next. Reactions
    /// may raise follow-up events, which are handled after the current batch.
    fn dispatch(&mut self, events: Vec<GameEvent>) -> Result<()> {
        let mut queue: VecDeque<GameEvent> = events.into();
        while let Some(event) = queue.pop_front() {
            self.bus.publish(Event::Game(event.clone()));

            let mut follow_up = Vec::new();
            match event {
                GameEvent::ClueReached { clue } => {
                    self.world.collect_clue(clue, &mut follow_up)?;
                }
                GameEvent::ClueCollected { clue } => {
                    tracing::info!(%clue, journal = self.world.journal().len(), "clue collected");
                }
                GameEvent::InterviewRequested { suspect } => {
                    self.set_phase(GamePhase::Interviewing { suspect });
                }
                GameEvent::RoomChangeRequested { room, position } => {
                    tracing::debug!(%room, %position, "room change requested");
                    self.world.move_room(&mut follow_up)?;
                }
                GameEvent::RoomChanged { from, to, position } => {
                    tracing::info!(%from, %to, %position, "entered room");
                }
                GameEvent::SuspectAccused { suspect, correct } => {
                    tracing::info!(%suspect, correct, "suspect accused");
                    if correct {
                        self.set_phase(GamePhase::Solved { murderer: suspect });
                    }
                }
            }
            queue.extend(follow_up);
        }
        Ok(())
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        tracing::info!(%from, %to, "phase changed");
        self.bus.publish(Event::Phase(PhaseEvent {
            from,
            to,
            clock: self.world.tick_count(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mystery_core::{
        Clue, ClueId, GameConfig, Mover, Player, Room, RoomId, Rooms, Transition, Trigger,
    };

    const HALL: RoomId = RoomId(0);
    const BUTLER: EntityId = EntityId(1);
    const MAID: EntityId = EntityId(2);

    fn session(min_clues: usize) -> Session {
        let mut rooms = Rooms::new();
        let mut hall = Room::from_ascii(
            "hall",
            &["#######", "#.....#", "#.....#", "#.....#", "#######"],
        )
        .unwrap();
        hall.add_trigger(
            Position::new(5, 2),
            Trigger {
                facing: CardinalDirection::East,
                transition: Transition {
                    destination_room: RoomId(1),
                    destination_position: Position::new(1, 1),
                    destination_direction: Some(CardinalDirection::East),
                },
            },
        )
        .unwrap();
        rooms.push(hall);
        rooms.push(Room::from_ascii("cellar", &["####", "#..#", "####"]).unwrap());

        let player = Player::new(
            "Detective",
            Mover::new(HALL, Position::new(1, 1), CardinalDirection::North),
        );
        let suspects = vec![
            Suspect::new(
                BUTLER,
                "Butler",
                Mover::new(HALL, Position::new(5, 3), CardinalDirection::South),
            )
            .murderer(true),
            Suspect::new(
                MAID,
                "Maid",
                Mover::new(HALL, Position::new(1, 3), CardinalDirection::South),
            ),
        ];
        let clues = vec![Clue::new(ClueId(1), "Glove", HALL, Position::new(3, 1))];
        let config = GameConfig {
            min_clues_for_accusation: min_clues,
            ..GameConfig::still()
        };
        let world = World::new(config, rooms, player, suspects, clues).unwrap();
        Session::new(world, EventBus::with_capacity(32))
    }

    #[test]
    fn reaching_a_clue_collects_it() {
        let mut session = session(1);
        let mut investigation = session.subscribe(Topic::Investigation);

        session.execute(Command::Click(Position::new(3, 1))).unwrap();
        session.execute(Command::Tick(5)).unwrap();

        assert_eq!(session.world().journal().len(), 1);
        assert_eq!(
            investigation.try_recv().unwrap(),
            Event::Game(GameEvent::ClueReached { clue: ClueId(1) })
        );
        assert_eq!(
            investigation.try_recv().unwrap(),
            Event::Game(GameEvent::ClueCollected { clue: ClueId(1) })
        );
        assert_eq!(session.status().unwrap().journal, vec!["Glove".to_string()]);
    }

    #[test]
    fn interview_blocks_movement_until_it_ends() {
        let mut session = session(1);
        let mut phases = session.subscribe(Topic::Session);

        session.execute(Command::Click(Position::new(5, 3))).unwrap();
        session.execute(Command::Tick(10)).unwrap();
        assert_eq!(session.phase(), GamePhase::Interviewing { suspect: BUTLER });

        let err = session
            .execute(Command::Move(CardinalDirection::South))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Busy { .. }));
        assert!(session.execute(Command::Click(Position::new(1, 1))).is_err());
        // Time still passes during an interview.
        session.execute(Command::Tick(1)).unwrap();

        assert_eq!(
            session.execute(Command::EndInterview).unwrap(),
            CommandOutcome::InterviewEnded(BUTLER)
        );
        assert!(session.world().suspect(BUTLER).unwrap().can_move());
        assert_eq!(session.phase(), GamePhase::Exploring);
        assert!(matches!(
            session.execute(Command::EndInterview),
            Err(RuntimeError::NotInterviewing)
        ));

        let Event::Phase(entered) = phases.try_recv().unwrap() else {
            panic!("expected a phase event");
        };
        assert_eq!(entered.to, GamePhase::Interviewing { suspect: BUTLER });
    }

    #[test]
    fn stepping_onto_the_exit_mat_changes_room() {
        let mut session = session(1);
        let mut movement = session.subscribe(Topic::Movement);

        session.execute(Command::Click(Position::new(4, 2))).unwrap();
        session.execute(Command::Tick(10)).unwrap();
        let outcome = session
            .execute(Command::Move(CardinalDirection::East))
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Moved(MoveOutcome::Started));
        session.execute(Command::Tick(2)).unwrap();

        let status = session.status().unwrap();
        assert_eq!(status.room, "cellar");
        assert_eq!(status.position, Position::new(1, 1));
        assert!(status.suspects_here.is_empty());

        assert!(matches!(
            movement.try_recv().unwrap(),
            Event::Game(GameEvent::RoomChangeRequested { .. })
        ));
        assert!(matches!(
            movement.try_recv().unwrap(),
            Event::Game(GameEvent::RoomChanged { .. })
        ));
    }

    #[test]
    fn accusation_without_evidence_fails() {
        let mut session = session(1);
        let outcome = session.execute(Command::Accuse("butler".into())).unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::Accused {
                suspect: BUTLER,
                correct: false
            }
        );
        assert_eq!(session.phase(), GamePhase::Exploring);
        assert!(matches!(
            session.execute(Command::Accuse("Gardener".into())),
            Err(RuntimeError::UnknownSuspect(_))
        ));
    }

    #[test]
    fn correct_accusation_solves_the_case() {
        let mut session = session(1);
        session.execute(Command::Click(Position::new(3, 1))).unwrap();
        session.execute(Command::Tick(5)).unwrap();

        assert!(matches!(
            session.execute(Command::Accuse("Maid".into())).unwrap(),
            CommandOutcome::Accused { correct: false, .. }
        ));
        session.execute(Command::Accuse("Butler".into())).unwrap();
        assert_eq!(session.phase(), GamePhase::Solved { murderer: BUTLER });
        assert!(matches!(
            session.execute(Command::Tick(1)),
            Err(RuntimeError::Solved)
        ));
    }
}
