//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use game_core::{EnemyTypeDef, GameConfig, ItemDef, QuestDef, SkillDef};
use tracing::{info, warn};

use crate::{Content, ContentIssue};
use crate::loaders::{
    ConfigLoader, EnemyLoader, ItemLoader, LoadResult, QuestLoader, SkillLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional)
/// ├── enemies.json
/// ├── skills.json
/// ├── items.json
/// └── quests.json   (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or the defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load enemy templates from `enemies.json`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTypeDef>> {
        EnemyLoader::load(&self.data_dir.join("enemies.json"))
    }

    /// Load the skill tree from `skills.json`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDef>> {
        SkillLoader::load(&self.data_dir.join("skills.json"))
    }

    /// Load item definitions from `items.json`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDef>> {
        ItemLoader::load(&self.data_dir.join("items.json"))
    }

    /// Load quest definitions from `quests.json`, or none when absent.
    pub fn load_quests(&self) -> LoadResult<Vec<QuestDef>> {
        let path = self.data_dir.join("quests.json");
        if !path.exists() {
            return Ok(Vec::new());
        }
        QuestLoader::load(&path)
    }

    /// Loads every catalog and validates them together.
    ///
    /// Validation issues are logged at `warn` and do not fail the load.
    pub fn load_all(&self) -> LoadResult<Content> {
        let (content, issues) = self.load_with_issues()?;
        for issue in &issues {
            warn!(target: "content", dir = %self.data_dir.display(), "{issue}");
        }
        info!(
            target: "content",
            enemies = content.enemies.len(),
            skills = content.skills.len(),
            items = content.items.len(),
            quests = content.quests.len(),
            issues = issues.len(),
            "loaded content"
        );
        Ok(content)
    }

    /// Like [`load_all`](Self::load_all) but fails on the first validation issue.
    pub fn load_strict(&self) -> LoadResult<Content> {
        let (content, issues) = self.load_with_issues()?;
        if let Some(issue) = issues.first() {
            anyhow::bail!("Invalid content in {}: {}", self.data_dir.display(), issue);
        }
        Ok(content)
    }

    fn load_with_issues(&self) -> LoadResult<(Content, Vec<ContentIssue>)> {
        Ok(Content::from_definitions(
            self.load_enemies()?,
            self.load_skills()?,
            self.load_items()?,
            self.load_quests()?,
            self.load_config()?,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
