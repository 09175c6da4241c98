//! Skill tree loader.

use std::path::Path;

use game_core::SkillDef;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill file structure for JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillFile {
    pub skills: Vec<SkillDef>,
}

/// Loader for skill definitions from JSON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDef>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDef>> {
        let file: SkillFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill JSON: {}", e))?;

        Ok(file.skills)
    }
}
