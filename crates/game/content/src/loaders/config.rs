//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their built-in defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("flee_chance = 0.5\n[hit_chance]\nmin = 0.2\n").unwrap();
        assert_eq!(config.flee_chance, 0.5);
        assert_eq!(config.hit_chance.min, 0.2);
        assert_eq!(config.hit_chance.max, 0.99);
        assert_eq!(config.xp_per_level, GameConfig::DEFAULT_XP_PER_LEVEL);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ConfigLoader::parse("xp_per_level = \"twenty\"").is_err());
    }
}
