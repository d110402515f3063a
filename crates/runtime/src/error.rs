//! Unified error types surfaced by the runtime API.
//!
//! Wraps world failures and phase conflicts so clients can report them with
//! consistent context.
use mystery_core::{ErrorSeverity, GameError, WorldError};
use thiserror::Error;

use crate::session::GamePhase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("command not available while {phase}")]
    Busy { phase: GamePhase },

    #[error("no interview in progress")]
    NotInterviewing,

    #[error("no suspect named '{0}'")]
    UnknownSuspect(String),

    #[error("the case is already solved")]
    Solved,
}

impl RuntimeError {
    /// Whether the session can keep accepting commands after this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::World(err) => err.severity(),
            RuntimeError::Busy { .. } | RuntimeError::NotInterviewing => {
                ErrorSeverity::Recoverable
            }
            RuntimeError::UnknownSuspect(_) | RuntimeError::Solved => ErrorSeverity::Validation,
        }
    }
}
