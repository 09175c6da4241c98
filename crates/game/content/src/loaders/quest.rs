//! Quest registry loader.

use std::path::Path;

use game_core::QuestDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Quest file structure for JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestFile {
    pub quests: Vec<QuestDef>,
}

/// Loader for quest definitions from JSON files.
pub struct QuestLoader;

impl QuestLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<QuestDef>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<QuestDef>> {
        let file: QuestFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quest JSON: {}", e))?;

        Ok(file.quests)
    }
}
