//! Skill tree model: unlocking nodes and casting unlocked skills.
mod cast;
mod tree;

pub use cast::{CastOutcome, cast, validate_cast};
pub use tree::{unlock, unlockable};
