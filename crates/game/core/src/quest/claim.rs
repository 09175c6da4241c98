use crate::config::GameConfig;
use crate::env::{Inventory, ItemKind, ItemOracle, QuestOracle};
use crate::error::CombatError;
use crate::progression::{ProgressionReport, award};
use crate::state::{ItemId, PlayerProfile, QuestId, QuestState, SkillId};

/// What claiming a quest paid out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestClaim {
    pub quest: QuestId,
    /// XP and money, with any level-ups they caused.
    pub progression: ProgressionReport,
    pub items: Vec<(ItemId, u32)>,
    /// Skills newly unlocked; ones the player already had are left out.
    pub skills: Vec<SkillId>,
}

/// Pays out a complete quest and marks it done.
///
/// XP goes through [`award`] so quest rewards level the player exactly like
/// battle rewards. Fetched items are not taken from the inventory.
///
/// # Errors
///
/// - [`CombatError::UnknownQuest`] when the id is not in the registry
/// - [`CombatError::QuestNotComplete`] unless the quest is complete and unclaimed
/// - [`CombatError::ItemUnavailable`] when a reward item is missing from the
///   item catalog; nothing is paid in that case
pub fn claim_rewards(
    profile: &mut PlayerProfile,
    id: &QuestId,
    quests: &dyn QuestOracle,
    items: &dyn ItemOracle,
    config: &GameConfig,
) -> Result<QuestClaim, CombatError> {
    let def = quests
        .quest(id)
        .ok_or_else(|| CombatError::UnknownQuest(id.clone()))?;
    if profile.quests.state(def) != Some(QuestState::Complete) {
        return Err(CombatError::QuestNotComplete(id.clone()));
    }

    let rewards = &def.rewards;
    let mut granted = Vec::with_capacity(rewards.items.len());
    for (item, count) in &rewards.items {
        let item_def = items
            .item(item)
            .ok_or_else(|| CombatError::ItemUnavailable(item.clone()))?;
        granted.push((item_def, *count));
    }

    let progression = award(profile, rewards.xp, rewards.money, config);
    for (item_def, count) in &granted {
        match &item_def.kind {
            ItemKind::Consumable { .. } => {
                profile.inventory.add_consumable(item_def.id.clone(), *count);
            }
            ItemKind::Equipment { .. } => {
                for equipment in (0..*count).filter_map(|_| item_def.to_equipment()) {
                    profile.inventory.stow(equipment);
                }
            }
        }
    }

    let mut skills = Vec::new();
    for skill in &rewards.skills {
        if !profile.skills.is_unlocked(skill) {
            profile.skills.grant(skill.clone());
            skills.push(skill.clone());
        }
    }

    profile.quests.finish(id);
    Ok(QuestClaim {
        quest: id.clone(),
        progression,
        items: granted
            .into_iter()
            .map(|(item_def, count)| (item_def.id.clone(), count))
            .collect(),
        skills,
    })
}
