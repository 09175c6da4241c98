//! Stat model.
//!
//! - [`BaseStats`]: stored, allocatable attributes
//! - [`StatBonuses`]: sparse equipment deltas
//! - [`StatModifiers`]: temporary skill/item deltas inside a battle
//! - [`DerivedStats`]: values computed from the three layers above
//! - [`ResourceMeter`]: clamped HP/SP pools
//!
//! `effective(stat) = max(0, base + equipment + modifiers)`
mod bonus;
mod core;
mod derived;
mod modifiers;
mod resources;

pub use bonus::StatBonuses;
pub use core::{BaseStats, StatKind};
pub use derived::{
    DerivedStats, debuff_duration, debuff_reduction, skill_damage_multiplier, sp_regen,
};
pub use modifiers::{ModifierSource, StatModifier, StatModifiers};
pub use resources::ResourceMeter;
