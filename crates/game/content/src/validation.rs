//! Load-time content checks.
//!
//! Validation never fails a load by itself. It returns every problem it finds
//! so the caller can log them or refuse to start.

use game_core::{EnemyTypeId, GameConfig, ItemKind, QuestId, QuestObjective, SkillId};

use crate::Content;

/// A problem found in authored content.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContentIssue {
    #[error("duplicate id `{id}` in {catalog}")]
    DuplicateId { catalog: &'static str, id: String },

    #[error("skill `{skill}` requires unknown skill `{prerequisite}`")]
    UnknownPrerequisite { skill: SkillId, prerequisite: SkillId },

    #[error("tier {tier} skill `{skill}` has no prerequisite")]
    MissingPrerequisite { skill: SkillId, tier: u8 },

    #[error("skill `{skill}` is not above its prerequisite `{prerequisite}` in the tree")]
    PrerequisiteNotLower { skill: SkillId, prerequisite: SkillId },

    #[error("enemy `{enemy}` has non-positive {stat} ({value})")]
    NonPositiveStat {
        enemy: EnemyTypeId,
        stat: &'static str,
        value: i32,
    },

    #[error("{subject} has chance {chance} outside [0, 1]")]
    ChanceOutOfRange { subject: String, chance: f64 },

    #[error("equipment `{item}` grants no bonuses")]
    EmptyEquipment { item: String },

    #[error("quest `{quest}` references unknown {kind} `{id}`")]
    UnknownQuestReference {
        quest: QuestId,
        kind: &'static str,
        id: String,
    },

    #[error("quest `{quest}` has no objectives")]
    EmptyQuest { quest: QuestId },

    #[error("objective {index} of quest `{quest}` requires nothing")]
    ZeroObjective { quest: QuestId, index: usize },

    #[error("config field `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

/// Checks cross-references and value ranges across all catalogs.
pub fn validate(content: &Content) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    for enemy in content.enemies.iter() {
        if enemy.hp <= 0 {
            issues.push(ContentIssue::NonPositiveStat {
                enemy: enemy.id.clone(),
                stat: "hp",
                value: enemy.hp,
            });
        }
        if let Some(ability) = &enemy.ability {
            if !(0.0..=1.0).contains(&ability.chance) {
                issues.push(ContentIssue::ChanceOutOfRange {
                    subject: format!("ability `{}` of enemy `{}`", ability.name, enemy.id),
                    chance: ability.chance,
                });
            }
        }
    }

    for skill in content.skills.iter() {
        match &skill.prerequisite {
            None if skill.tier > 0 => issues.push(ContentIssue::MissingPrerequisite {
                skill: skill.id.clone(),
                tier: skill.tier,
            }),
            None => {}
            Some(prerequisite) => match content.skills.get(prerequisite) {
                None => issues.push(ContentIssue::UnknownPrerequisite {
                    skill: skill.id.clone(),
                    prerequisite: prerequisite.clone(),
                }),
                Some(parent) if parent.tier >= skill.tier => {
                    issues.push(ContentIssue::PrerequisiteNotLower {
                        skill: skill.id.clone(),
                        prerequisite: prerequisite.clone(),
                    })
                }
                Some(_) => {}
            },
        }
    }

    for item in content.items.iter() {
        if let ItemKind::Equipment { bonuses, .. } = &item.kind {
            if bonuses.is_empty() {
                issues.push(ContentIssue::EmptyEquipment {
                    item: item.id.to_string(),
                });
            }
        }
    }

    issues.extend(validate_quests(content));
    issues.extend(validate_config(&content.config));
    issues
}

fn validate_quests(content: &Content) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    for quest in content.quests.iter() {
        let unknown = |kind: &'static str, id: &dyn std::fmt::Display| {
            ContentIssue::UnknownQuestReference {
                quest: quest.id.clone(),
                kind,
                id: id.to_string(),
            }
        };

        if quest.objectives.is_empty() {
            issues.push(ContentIssue::EmptyQuest {
                quest: quest.id.clone(),
            });
        }
        for (index, objective) in quest.objectives.iter().enumerate() {
            if objective.required() == 0 {
                issues.push(ContentIssue::ZeroObjective {
                    quest: quest.id.clone(),
                    index,
                });
            }
            match objective {
                QuestObjective::Kill { enemy, .. } if !content.enemies.contains(enemy) => {
                    issues.push(unknown("enemy", enemy));
                }
                QuestObjective::Fetch { item, .. } if !content.items.contains(item) => {
                    issues.push(unknown("item", item));
                }
                _ => {}
            }
        }

        if let Some(prerequisite) = &quest.prerequisite {
            if !content.quests.contains(prerequisite) {
                issues.push(unknown("quest", prerequisite));
            }
        }
        for item in quest.rewards.items.keys() {
            if !content.items.contains(item) {
                issues.push(unknown("item", item));
            }
        }
        for skill in &quest.rewards.skills {
            if !content.skills.contains(skill) {
                issues.push(unknown("skill", skill));
            }
        }
    }
    issues
}

fn validate_config(config: &GameConfig) -> Vec<ContentIssue> {
    let mut issues = Vec::new();
    let hit = &config.hit_chance;

    for (subject, chance) in [
        ("flee_chance", config.flee_chance),
        ("bonus_drop_chance", config.bonus_drop_chance),
        ("hit_chance.min", hit.min),
        ("hit_chance.max", hit.max),
    ] {
        if !(0.0..=1.0).contains(&chance) {
            issues.push(ContentIssue::ChanceOutOfRange {
                subject: subject.to_string(),
                chance,
            });
        }
    }
    if hit.min > hit.max {
        issues.push(ContentIssue::InvalidConfig {
            field: "hit_chance",
            reason: "min exceeds max",
        });
    }
    if config.xp_per_level == 0 {
        issues.push(ContentIssue::InvalidConfig {
            field: "xp_per_level",
            reason: "must be positive",
        });
    }
    if config.defend_divisor == 0 {
        issues.push(ContentIssue::InvalidConfig {
            field: "defend_divisor",
            reason: "must be positive",
        });
    }
    issues
}
