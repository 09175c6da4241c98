//! Traits describing read-only content and external collaborators.
//!
//! Oracles expose enemy templates, skill definitions, item definitions and
//! quests.
//! The [`Env`] aggregate bundles them with the balance config so the combat
//! engine can reach everything it needs without coupling to a concrete store.
//! Randomness and the inventory are passed separately because they mutate.
mod catalog;
mod inventory;
mod rng;

pub use catalog::{
    ConsumableEffect, EnemyCatalog, EnemyOracle, EnemyTypeDef, ItemCatalog, ItemDef, ItemKind,
    ItemOracle, QuestCatalog, QuestDef, QuestObjective, QuestOracle, QuestRewards, ScalingStat,
    SkillCatalog, SkillDef, SkillEffectKind, SkillOracle, SpecialAbility,
};
pub use inventory::Inventory;
pub use rng::{ChaChaRng, RngOracle, ScriptedRng};

use crate::config::GameConfig;

/// Aggregates the read-only oracles required by the combat engine.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    enemies: &'a dyn EnemyOracle,
    skills: &'a dyn SkillOracle,
    items: &'a dyn ItemOracle,
    config: &'a GameConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        enemies: &'a dyn EnemyOracle,
        skills: &'a dyn SkillOracle,
        items: &'a dyn ItemOracle,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            enemies,
            skills,
            items,
            config,
        }
    }

    pub fn enemies(&self) -> &'a dyn EnemyOracle {
        self.enemies
    }

    pub fn skills(&self) -> &'a dyn SkillOracle {
        self.skills
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
