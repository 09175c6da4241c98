//! Unified error type surfaced by the runtime.
//!
//! Wraps rules-engine and repository failures so callers can bubble them up
//! with one `?`.

use thiserror::Error;

use game_core::{CombatError, ErrorSeverity, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no battle is in progress")]
    NoActiveBattle,

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("no profile saved in slot `{0}`")]
    ProfileNotFound(String),

    #[error("scripted encounter `{0}` was already cleared")]
    EncounterCleared(String),
}

impl RuntimeError {
    /// Repository failures are internal; everything else is a rejected request
    /// that leaves the session usable.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(err) => err.severity(),
            Self::Repository(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }
}
