//! Immutable content definitions and the read-only catalogs that hold them.
//!
//! Templates are loaded once (see the `game-content` crate) and injected into
//! the engine through the oracle traits. Battles never mutate a template; each
//! encounter instantiates fresh combatants from them.

use std::collections::BTreeMap;

use crate::state::{EnemyTypeId, EquipSlot, EquipmentItem, ItemId, QuestId, SkillId, StatusKind};
use crate::stats::{StatBonuses, StatKind};

// ============================================================================
// Skills
// ============================================================================

/// Closed set of skill effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillEffectKind {
    /// Subtracts the value from the target's HP.
    Damage,
    /// Raises the caster's Resilience for the skill's duration.
    BuffDefense,
    /// Damages the target and heals the caster by the same amount.
    Drain,
    /// Lowers the target's Strength for the skill's duration.
    DebuffAttack,
    /// Lowers the target's Strength and Resilience for the skill's duration.
    DebuffBoth,
    /// Restores the caster's HP.
    Heal,
    /// Clears every status effect on the caster.
    CureStatus,
}

impl SkillEffectKind {
    /// Whether the effect lands on an opposing combatant.
    pub const fn targets_enemy(self) -> bool {
        matches!(
            self,
            Self::Damage | Self::Drain | Self::DebuffAttack | Self::DebuffBoth
        )
    }
}

/// Stat a skill's value scales with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScalingStat {
    #[default]
    Intelligence,
    Strength,
    None,
}

impl ScalingStat {
    pub const fn stat(self) -> Option<StatKind> {
        match self {
            Self::Intelligence => Some(StatKind::Intelligence),
            Self::Strength => Some(StatKind::Strength),
            Self::None => None,
        }
    }
}

/// A skill tree node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    pub sp_cost: u32,
    pub effect: SkillEffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling_stat: ScalingStat,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisite: Option<SkillId>,
    #[cfg_attr(feature = "serde", serde(default = "default_unlock_cost"))]
    pub unlock_cost: u32,
    /// Turns a buff or debuff lasts; falls back to the configured default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
}

#[cfg(feature = "serde")]
fn default_unlock_cost() -> u32 {
    1
}

impl SkillDef {
    pub fn new(id: impl Into<SkillId>, sp_cost: u32, effect: SkillEffectKind, base_value: i32) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            sp_cost,
            effect,
            base_value,
            scaling_stat: ScalingStat::Intelligence,
            scaling: 0.0,
            tier: 0,
            prerequisite: None,
            unlock_cost: 1,
            duration: None,
        }
    }

    pub fn with_scaling(mut self, stat: ScalingStat, factor: f64) -> Self {
        self.scaling_stat = stat;
        self.scaling = factor;
        self
    }

    pub fn with_prerequisite(mut self, tier: u8, prerequisite: impl Into<SkillId>, cost: u32) -> Self {
        self.tier = tier;
        self.prerequisite = Some(prerequisite.into());
        self.unlock_cost = cost;
        self
    }

    /// `floor(base + scaling * stat)`, at least 1 for every kind except cure.
    pub fn value(&self, stat_value: i32) -> u32 {
        let raw = (f64::from(self.base_value) + self.scaling * f64::from(stat_value)).floor();
        let value = if raw > 0.0 { raw as u32 } else { 0 };
        match self.effect {
            SkillEffectKind::CureStatus => value,
            _ => value.max(1),
        }
    }
}

// ============================================================================
// Enemies
// ============================================================================

/// Special ability an enemy may use instead of a plain attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAbility {
    pub name: String,
    pub inflicts: StatusKind,
    /// Trigger probability in `[0, 1]`.
    pub chance: f64,
}

/// Immutable enemy template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTypeDef {
    pub id: EnemyTypeId,
    pub name: String,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dexterity: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub money_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability: Option<SpecialAbility>,
}

impl EnemyTypeDef {
    pub fn new(id: impl Into<EnemyTypeId>, name: impl Into<String>, hp: i32, attack: i32, defense: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hp,
            attack,
            defense,
            dexterity: 0,
            xp_reward: 0,
            money_reward: 0,
            ability: None,
        }
    }

    pub fn with_rewards(mut self, xp: u32, money: u32) -> Self {
        self.xp_reward = xp;
        self.money_reward = money;
        self
    }

    pub fn with_ability(mut self, name: impl Into<String>, inflicts: StatusKind, chance: f64) -> Self {
        self.ability = Some(SpecialAbility {
            name: name.into(),
            inflicts,
            chance,
        });
        self
    }
}

// ============================================================================
// Items
// ============================================================================

/// Effect of using a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConsumableEffect {
    /// Restores HP to the user.
    Heal(u32),
    /// Damages the target, ignoring defense.
    Damage(u32),
    /// Raises the user's Resilience until the battle ends.
    BuffDefense(i32),
    /// Clears every status effect on the user.
    CureStatus,
    /// Restores SP to the user.
    RestoreSp(u32),
}

impl ConsumableEffect {
    pub const fn targets_enemy(self) -> bool {
        matches!(self, Self::Damage(_))
    }
}

/// Type-specific item data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ItemKind {
    Consumable {
        effect: ConsumableEffect,
    },
    Equipment {
        slot: EquipSlot,
        #[cfg_attr(feature = "serde", serde(default))]
        bonuses: StatBonuses,
    },
}

/// Item definition shared by shops, drops and the Item action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: u32,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: ItemKind,
}

impl ItemDef {
    pub fn consumable(id: impl Into<ItemId>, name: impl Into<String>, effect: ConsumableEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: 0,
            kind: ItemKind::Consumable { effect },
        }
    }

    pub fn consumable_effect(&self) -> Option<ConsumableEffect> {
        match &self.kind {
            ItemKind::Consumable { effect } => Some(*effect),
            ItemKind::Equipment { .. } => None,
        }
    }

    /// Fresh equipment instance for equipment definitions.
    pub fn to_equipment(&self) -> Option<EquipmentItem> {
        match &self.kind {
            ItemKind::Equipment { slot, bonuses } => Some(EquipmentItem {
                id: self.id.clone(),
                name: self.name.clone(),
                slot: *slot,
                bonuses: bonuses.clone(),
                price: self.price,
            }),
            ItemKind::Consumable { .. } => None,
        }
    }
}

// ============================================================================
// Quests
// ============================================================================

/// One thing a quest asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum QuestObjective {
    /// Defeat `required` enemies of one type.
    Kill { enemy: EnemyTypeId, required: u32 },
    /// Hold `required` copies of an item at once.
    Fetch { item: ItemId, required: u32 },
    /// Reach a named location.
    Visit { location: String },
}

impl QuestObjective {
    pub const fn required(&self) -> u32 {
        match self {
            Self::Kill { required, .. } | Self::Fetch { required, .. } => *required,
            Self::Visit { .. } => 1,
        }
    }
}

/// What claiming a finished quest pays out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestRewards {
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub money: u32,
    /// Consumables and equipment alike, by count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: BTreeMap<ItemId, u32>,
    /// Skills unlocked outright, without spending points.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestDef {
    pub id: QuestId,
    pub name: String,
    /// NPC that offers the quest and pays it out.
    #[cfg_attr(feature = "serde", serde(default))]
    pub giver: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub objectives: Vec<QuestObjective>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: QuestRewards,
    /// Quest that must be claimed before this one is offered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisite: Option<QuestId>,
}

impl QuestDef {
    pub fn new(id: impl Into<QuestId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            giver: String::new(),
            description: String::new(),
            objectives: Vec::new(),
            rewards: QuestRewards::default(),
            prerequisite: None,
        }
    }

    pub fn with_objective(mut self, objective: QuestObjective) -> Self {
        self.objectives.push(objective);
        self
    }

    pub fn with_rewards(mut self, xp: u32, money: u32) -> Self {
        self.rewards.xp = xp;
        self.rewards.money = money;
        self
    }

    pub fn with_item_reward(mut self, item: impl Into<ItemId>, count: u32) -> Self {
        *self.rewards.items.entry(item.into()).or_insert(0) += count;
        self
    }

    pub fn with_skill_reward(mut self, skill: impl Into<SkillId>) -> Self {
        self.rewards.skills.push(skill.into());
        self
    }

    pub fn with_prerequisite(mut self, quest: impl Into<QuestId>) -> Self {
        self.prerequisite = Some(quest.into());
        self
    }
}

// ============================================================================
// Oracles and catalogs
// ============================================================================

/// Read-only enemy registry.
pub trait EnemyOracle {
    fn enemy(&self, id: &EnemyTypeId) -> Option<&EnemyTypeDef>;
}

/// Read-only skill tree.
pub trait SkillOracle {
    fn skill(&self, id: &SkillId) -> Option<&SkillDef>;
}

/// Read-only item definitions.
pub trait ItemOracle {
    fn item(&self, id: &ItemId) -> Option<&ItemDef>;
}

/// Read-only quest registry.
pub trait QuestOracle {
    fn quest(&self, id: &QuestId) -> Option<&QuestDef>;
}

macro_rules! catalog {
    ($(#[$meta:meta])* $name:ident, $key:ty, $def:ty, $oracle:ident :: $method:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name {
            entries: BTreeMap<$key, $def>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Inserts a definition, returning the one it replaced.
            pub fn insert(&mut self, def: $def) -> Option<$def> {
                self.entries.insert(def.id.clone(), def)
            }

            pub fn get(&self, id: &$key) -> Option<&$def> {
                self.entries.get(id)
            }

            pub fn contains(&self, id: &$key) -> bool {
                self.entries.contains_key(id)
            }

            pub fn iter(&self) -> impl Iterator<Item = &$def> {
                self.entries.values()
            }

            pub fn len(&self) -> usize {
                self.entries.len()
            }

            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }
        }

        impl FromIterator<$def> for $name {
            fn from_iter<T: IntoIterator<Item = $def>>(iter: T) -> Self {
                let mut catalog = Self::new();
                for def in iter {
                    catalog.insert(def);
                }
                catalog
            }
        }

        impl $oracle for $name {
            fn $method(&self, id: &$key) -> Option<&$def> {
                self.get(id)
            }
        }
    };
}

catalog!(
    /// Enemy templates keyed by type id.
    EnemyCatalog, EnemyTypeId, EnemyTypeDef, EnemyOracle::enemy
);

catalog!(
    /// Skill definitions keyed by skill id.
    SkillCatalog, SkillId, SkillDef, SkillOracle::skill
);

catalog!(
    /// Item definitions keyed by item id.
    ItemCatalog, ItemId, ItemDef, ItemOracle::item
);

catalog!(
    /// Quest definitions keyed by quest id.
    QuestCatalog, QuestId, QuestDef, QuestOracle::quest
);
