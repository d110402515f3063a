//! Murder-mystery game client binary.
//!
//! Main entry point for the `mystery` command. The binary is the composition
//! root that assembles:
//! 1. Runtime configuration from the environment (and `.env`)
//! 2. File logging for the session
//! 3. The world, loaded from the data directory
//! 4. A [`Session`] driven by stdin commands and a tick timer
//!
//! # Examples
//!
//! ```bash
//! MYSTERY_DATA_DIR=data MYSTERY_SEED=7 cargo run -p mystery-client
//! ```
mod input;
mod logging;
mod render;

use anyhow::{Context, Result};
use mystery_content::ContentFactory;
use mystery_core::{Interaction, MoveOutcome};
use mystery_runtime::{
    Command, CommandOutcome, Event, EventBus, GamePhase, RuntimeConfig, RuntimeError, Session,
    Topic,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::MissedTickBehavior;

use input::{Input, ParseError};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _log_guard = logging::setup_logging(config.session_id.as_deref())?;

    let game_seed = config.game_seed.unwrap_or_else(logging::unix_seconds);
    tracing::info!("Starting mystery client");
    tracing::info!(data_dir = %config.data_dir.display(), game_seed, "Loading content");

    let world = ContentFactory::new(&config.data_dir)
        .load_world(game_seed)
        .with_context(|| format!("Failed to load content from {}", config.data_dir.display()))?;
    let mut session = Session::new(world, EventBus::with_capacity(config.event_capacity));
    let mut receivers = session.bus().subscribe_multiple(&[
        Topic::Movement,
        Topic::Investigation,
        Topic::Session,
    ]);

    println!("{}", render::room(session.world())?);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_line(&mut session, &line)? {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Err(err) = session.execute(Command::Tick(1))
                    && ends_session(&err)
                {
                    return Err(err.into());
                }
            }
        }

        print_events(&session, &mut receivers);
        if let GamePhase::Solved { murderer } = session.phase() {
            tracing::info!(%murderer, clock = %session.world().tick_count(), "Case solved");
            break;
        }
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Handles one line of input. Returns `false` when the player quits.
///
/// Rejected commands are reported to the player; only errors that leave the
/// world inconsistent end the session.
fn handle_line(session: &mut Session, line: &str) -> Result<bool> {
    let input = match input::parse(line) {
        Ok(input) => input,
        Err(ParseError::Empty) => return Ok(true),
        Err(err) => {
            println!("{}", err);
            return Ok(true);
        }
    };

    match input {
        Input::Quit => return Ok(false),
        Input::Help => println!("{}", input::HELP),
        Input::Look => println!("{}", render::room(session.world())?),
        Input::Status => println!("{}", serde_json::to_string_pretty(&session.status()?)?),
        Input::Journal => {
            let clues = session.world().journal().clues();
            if clues.is_empty() {
                println!("Your journal is empty.");
            }
            for clue in clues {
                println!("- {}: {}", clue.name(), clue.description());
            }
        }
        Input::Session(command) => match session.execute(command) {
            Ok(outcome) => describe(session, &outcome)?,
            Err(err) if ends_session(&err) => return Err(err.into()),
            Err(err) => println!("{}", err),
        },
    }
    Ok(true)
}

/// Rejected commands are reported and play continues; only errors that leave
/// the world inconsistent stop the client.
fn ends_session(err: &RuntimeError) -> bool {
    err.severity().is_internal()
}

fn describe(session: &Session, outcome: &CommandOutcome) -> Result<()> {
    match outcome {
        CommandOutcome::Moved(MoveOutcome::Turned) => println!("Something blocks the way."),
        CommandOutcome::Moved(MoveOutcome::Ignored) => println!("You are still walking."),
        CommandOutcome::Moved(MoveOutcome::RoomChangeRequested) => {
            println!("{}", render::room(session.world())?)
        }
        CommandOutcome::Interacted(Interaction::None) => println!("Nothing to do there."),
        _ => {}
    }
    Ok(())
}

fn print_events(session: &Session, receivers: &mut [(Topic, broadcast::Receiver<Event>)]) {
    for (topic, receiver) in receivers.iter_mut() {
        loop {
            match receiver.try_recv() {
                Ok(event) => println!("{}", render::event(session.world(), &event)),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(?topic, skipped, "Event consumer lagged");
                }
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mystery_core::{EntityId, Position, RoomError, RoomId, WorldError};

    #[test]
    fn rejected_commands_keep_the_session_alive() {
        assert!(!ends_session(&RuntimeError::Solved));
        assert!(!ends_session(&RuntimeError::NotInterviewing));
        assert!(!ends_session(&RuntimeError::Busy {
            phase: GamePhase::Interviewing {
                suspect: EntityId(1)
            }
        }));
    }

    #[test]
    fn desynced_room_data_ends_the_session() {
        let err = RuntimeError::World(WorldError::Room(RoomError::NotATrigger {
            room: RoomId(0),
            position: Position::new(1, 1),
        }));
        assert!(ends_session(&err));
    }
}
