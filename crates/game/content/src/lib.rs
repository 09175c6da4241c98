//! Data-driven content definitions and loaders.
//!
//! This crate houses the authored game content and the loaders that read it:
//! - Enemy types (JSON)
//! - Skill tree (JSON)
//! - Items, consumable and equipment (JSON)
//! - Quests (JSON)
//! - Balance configuration (TOML)
//!
//! Content is consumed by the rules engine through the read-only oracles in
//! `game_core::env` and never appears in battle or profile state.

mod content;
pub mod validation;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use content::Content;
pub use validation::{ContentIssue, validate};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, ItemLoader, LoadResult, QuestLoader, SkillLoader,
    bundled,
};
