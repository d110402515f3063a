//! Session orchestration for the murder-mystery simulation.
//!
//! This crate wraps a [`mystery_core::World`] in a [`Session`] that owns the
//! game phase, reacts to the events the core raises, and republishes them on a
//! topic-based [`EventBus`] for any number of observers.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the command surface and phase machine
//! - [`events`] provides the topic-based event bus
//! - [`config`] reads runtime settings from the environment
//! - [`error`] defines [`RuntimeError`]
pub mod config;
pub mod error;
pub mod events;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, PhaseEvent, Topic};
pub use session::{Command, CommandOutcome, GamePhase, Session, SessionStatus, SuspectStatus};
