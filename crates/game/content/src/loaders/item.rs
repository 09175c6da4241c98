//! Item catalog loader.

use std::path::Path;

use game_core::ItemDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item file structure for JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFile {
    pub items: Vec<ItemDef>,
}

/// Loader for item definitions from JSON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDef>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDef>> {
        let file: ItemFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item JSON: {}", e))?;

        Ok(file.items)
    }
}
