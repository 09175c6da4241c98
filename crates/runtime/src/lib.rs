//! Runtime orchestration for the combat and progression rules.
//!
//! This crate wires the pure `game-core` engine to loaded content, profile
//! persistence and logging. Consumers open a [`Session`] per save slot and drive
//! battles through it; the session is the only place where battle results are
//! written back into a [`game_core::PlayerProfile`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the battle lifecycle and out-of-battle profile management
//! - [`encounter`] describes scripted placements and random encounter tables
//! - [`repository`] provides profile persistence adapters
//! - [`logging`] installs the tracing subscriber for binaries and tools
pub mod encounter;
pub mod error;
pub mod logging;
pub mod repository;
pub mod session;

pub use encounter::{EncounterTable, ScriptedEncounter, roll_bonus_drop};
pub use error::{Result, RuntimeError};
pub use repository::{
    FileProfileRepository, InMemoryProfileRepo, ProfileRepository, RepositoryError,
};
pub use session::{BattleConclusion, Session, TurnOutcome};
