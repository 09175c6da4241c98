//! Content compiled into the crate.

use crate::Content;
use crate::loaders::{
    ConfigLoader, EnemyLoader, ItemLoader, LoadResult, QuestLoader, SkillLoader,
};

pub const ENEMIES_JSON: &str = include_str!("../../data/enemies.json");
pub const SKILLS_JSON: &str = include_str!("../../data/skills.json");
pub const ITEMS_JSON: &str = include_str!("../../data/items.json");
pub const QUESTS_JSON: &str = include_str!("../../data/quests.json");
pub const CONFIG_TOML: &str = include_str!("../../data/config.toml");

/// Parses the bundled default content.
pub fn load() -> LoadResult<Content> {
    let (content, issues) = Content::from_definitions(
        EnemyLoader::parse(ENEMIES_JSON)?,
        SkillLoader::parse(SKILLS_JSON)?,
        ItemLoader::parse(ITEMS_JSON)?,
        QuestLoader::parse(QUESTS_JSON)?,
        ConfigLoader::parse(CONFIG_TOML)?,
    );
    if let Some(issue) = issues.first() {
        anyhow::bail!("Bundled content is invalid: {}", issue);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use game_core::{ConsumableEffect, GameConfig, SkillEffectKind, SkillId, StatusKind};

    use super::*;

    #[test]
    fn bundled_content_loads_clean() {
        let content = load().unwrap();

        assert_eq!(content.enemies.len(), 5);
        assert_eq!(content.skills.len(), 9);
        assert_eq!(content.items.len(), 8);
        assert_eq!(content.quests.len(), 5);
        assert_eq!(content.config, GameConfig::default());
    }

    #[test]
    fn every_status_kind_has_an_enemy_source() {
        let content = load().unwrap();
        let inflicted: Vec<StatusKind> = content
            .enemies
            .iter()
            .filter_map(|enemy| enemy.ability.as_ref().map(|a| a.inflicts))
            .collect();
        for kind in [
            StatusKind::Poison,
            StatusKind::Stun,
            StatusKind::Burn,
            StatusKind::Despondent,
        ] {
            assert!(inflicted.contains(&kind), "{kind} missing");
        }
    }

    #[test]
    fn purge_caps_the_support_branch() {
        let content = load().unwrap();
        let purge = content.skills.get(&"purge".into()).unwrap();
        assert_eq!(purge.effect, SkillEffectKind::CureStatus);
        assert_eq!(purge.tier, 3);
        assert_eq!(purge.prerequisite, Some("reconstruct".into()));

        let kit = content.items.get(&"repair_kit".into()).unwrap();
        assert_eq!(kit.consumable_effect(), Some(ConsumableEffect::Heal(12)));
    }

    #[test]
    fn follow_up_quest_waits_for_spare_parts() {
        let content = load().unwrap();
        let restore = content.quests.get(&"circuit_restore".into()).unwrap();
        assert_eq!(restore.prerequisite, Some("spare_parts".into()));
        assert_eq!(restore.rewards.skills, vec![SkillId::from("spark_bolt")]);

        let pests = content.quests.get(&"pest_control".into()).unwrap();
        assert_eq!(pests.objectives[0].required(), 4);
    }
}
