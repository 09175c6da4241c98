//! Enemy type loader.

use std::path::Path;

use game_core::EnemyTypeDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy file structure for JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyFile {
    pub enemies: Vec<EnemyTypeDef>,
}

/// Loader for enemy templates from JSON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTypeDef>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyTypeDef>> {
        let file: EnemyFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy JSON: {}", e))?;

        Ok(file.enemies)
    }
}
