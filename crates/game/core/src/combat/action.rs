//! Closed set of battle actions.

use crate::state::{EntityId, ItemId, SkillId};

/// What a player-side combatant does on its turn.
///
/// Targets name enemy instances. A missing target on an offensive skill or
/// item means "the first living enemy"; a named target that has fallen by
/// the time the action resolves is replaced the same way.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleAction {
    Attack {
        target: EntityId,
    },
    Defend,
    Skill {
        skill: SkillId,
        target: Option<EntityId>,
    },
    Item {
        item: ItemId,
        target: Option<EntityId>,
    },
    Flee,
}

impl BattleAction {
    pub fn attack(target: EntityId) -> Self {
        Self::Attack { target }
    }

    pub fn skill(skill: impl Into<SkillId>, target: Option<EntityId>) -> Self {
        Self::Skill {
            skill: skill.into(),
            target,
        }
    }

    pub fn item(item: impl Into<ItemId>, target: Option<EntityId>) -> Self {
        Self::Item {
            item: item.into(),
            target,
        }
    }
}

/// An action waiting for the current turn to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedAction {
    pub actor: EntityId,
    pub action: BattleAction,
}
