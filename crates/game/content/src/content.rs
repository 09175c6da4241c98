//! In-memory content bundle.

use game_core::{
    EnemyCatalog, EnemyTypeDef, Env, GameConfig, ItemCatalog, ItemDef, QuestCatalog, QuestDef,
    SkillCatalog, SkillDef,
};

use crate::validation::{ContentIssue, validate};

/// Every catalog the rules engine reads, plus the balance config.
///
/// Built once at startup and then only borrowed: [`Content::env`] hands the
/// engine a read-only view. Quests stay outside that view since battles never
/// read them.
#[derive(Clone, Debug, Default)]
pub struct Content {
    pub enemies: EnemyCatalog,
    pub skills: SkillCatalog,
    pub items: ItemCatalog,
    pub quests: QuestCatalog,
    pub config: GameConfig,
}

impl Content {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Builds catalogs from raw definitions.
    ///
    /// Later duplicates replace earlier ones and are reported as issues.
    pub fn from_definitions(
        enemies: Vec<EnemyTypeDef>,
        skills: Vec<SkillDef>,
        items: Vec<ItemDef>,
        quests: Vec<QuestDef>,
        config: GameConfig,
    ) -> (Self, Vec<ContentIssue>) {
        let mut content = Self::new(config);
        let mut issues = Vec::new();

        for def in enemies {
            let id = def.id.to_string();
            if content.enemies.insert(def).is_some() {
                issues.push(ContentIssue::DuplicateId {
                    catalog: "enemies",
                    id,
                });
            }
        }
        for def in skills {
            let id = def.id.to_string();
            if content.skills.insert(def).is_some() {
                issues.push(ContentIssue::DuplicateId {
                    catalog: "skills",
                    id,
                });
            }
        }
        for def in items {
            let id = def.id.to_string();
            if content.items.insert(def).is_some() {
                issues.push(ContentIssue::DuplicateId {
                    catalog: "items",
                    id,
                });
            }
        }
        for def in quests {
            let id = def.id.to_string();
            if content.quests.insert(def).is_some() {
                issues.push(ContentIssue::DuplicateId {
                    catalog: "quests",
                    id,
                });
            }
        }

        issues.extend(validate(&content));
        (content, issues)
    }

    pub fn env(&self) -> Env<'_> {
        Env::new(&self.enemies, &self.skills, &self.items, &self.config)
    }

    pub fn validate(&self) -> Vec<ContentIssue> {
        validate(self)
    }
}
