//! Progression engine: XP, levels, stat allocation and the death penalty.
//!
//! All functions operate on the persisted [`PlayerProfile`](crate::PlayerProfile)
//! after a battle has been flushed; none of them touch a live battle.

mod allocation;
mod level;
mod penalty;

pub use allocation::allocate_stat;
pub use level::{LevelUp, ProgressionReport, award};
pub use penalty::{DeathPenalty, apply_death_penalty};
