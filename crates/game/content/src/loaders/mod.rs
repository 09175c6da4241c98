//! Content loaders for reading game data from files.
//!
//! Catalogs are JSON, the balance config is TOML. [`ContentFactory`] reads a
//! whole data directory; [`bundled`] parses the copies compiled into the crate.

pub mod bundled;
pub mod config;
pub mod enemy;
pub mod factory;
pub mod item;
pub mod quest;
pub mod skill;

pub use config::ConfigLoader;
pub use enemy::EnemyLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use quest::QuestLoader;
pub use skill::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
