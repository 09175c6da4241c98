//! Battle participants.
//!
//! A [`Combatant`] is a working copy: players are built from their persisted
//! [`PlayerProfile`] at battle start and enemies from an immutable
//! [`EnemyTypeDef`]. Nothing written to a combatant reaches persistent state
//! until the runtime flushes it at battle end.

use crate::config::GameConfig;
use crate::env::{EnemyTypeDef, SpecialAbility};
use crate::stats::{BaseStats, DerivedStats, ResourceMeter, StatKind, StatModifiers};

use super::{EnemyTypeId, EntityId, Equipment, PlayerProfile, SkillBook, StatusEffects};

/// Player or enemy, with the enemy's template id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Player,
    Enemy { type_id: EnemyTypeId },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub kind: CombatantKind,
    pub base: BaseStats,
    pub hp: ResourceMeter,
    pub sp: ResourceMeter,
    pub status: StatusEffects,
    pub modifiers: StatModifiers,
    /// Player only; empty for enemies.
    pub equipment: Equipment,
    /// Player only; empty for enemies.
    pub skills: SkillBook,
    /// Flat attack added on top of Strength (3 for players, 0 for enemies).
    pub attack_base: i32,
    pub ability: Option<SpecialAbility>,
    pub xp_reward: u32,
    pub money_reward: u32,
}

impl Combatant {
    /// Working copy of a player profile.
    pub fn from_profile(id: EntityId, profile: &PlayerProfile, config: &GameConfig) -> Self {
        let mut combatant = Self {
            id,
            name: profile.name.clone(),
            kind: CombatantKind::Player,
            base: profile.base,
            hp: ResourceMeter::full(0),
            sp: ResourceMeter::full(0),
            status: StatusEffects::empty(),
            modifiers: StatModifiers::new(),
            equipment: profile.equipment.clone(),
            skills: profile.skills.clone(),
            attack_base: config.player_attack_base,
            ability: None,
            xp_reward: 0,
            money_reward: 0,
        };
        combatant.hp = ResourceMeter::new(profile.hp, combatant.max_of(StatKind::MaxHp));
        combatant.sp = ResourceMeter::new(profile.sp, combatant.max_of(StatKind::MaxSp));
        combatant
    }

    /// Fresh instance of an enemy template at full HP.
    pub fn from_enemy(id: EntityId, def: &EnemyTypeDef) -> Self {
        let base = BaseStats::enemy(def.hp, def.attack, def.defense, def.dexterity);
        Self {
            id,
            name: def.name.clone(),
            kind: CombatantKind::Enemy {
                type_id: def.id.clone(),
            },
            base,
            hp: ResourceMeter::full(base.max_hp.max(0) as u32),
            sp: ResourceMeter::full(0),
            status: StatusEffects::empty(),
            modifiers: StatModifiers::new(),
            equipment: Equipment::empty(),
            skills: SkillBook::new(),
            attack_base: 0,
            ability: def.ability.clone(),
            xp_reward: def.xp_reward,
            money_reward: def.money_reward,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CombatantKind::Player)
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp.is_empty()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_defeated()
    }

    /// `max(0, base + equipment + temporary modifiers)`.
    pub fn effective(&self, stat: StatKind) -> i32 {
        (self.base.get(stat) + self.equipment.bonus(stat) + self.modifiers.total(stat)).max(0)
    }

    fn max_of(&self, stat: StatKind) -> u32 {
        self.effective(stat) as u32
    }

    /// `attack_base + effective(STR) - status penalties`, floored at 0.
    pub fn effective_attack(&self) -> i32 {
        (self.attack_base + self.effective(StatKind::Strength) - self.status.attack_penalty())
            .max(0)
    }

    pub fn effective_defense(&self) -> i32 {
        self.effective(StatKind::Resilience)
    }

    /// Dexterity as seen by the hit formula. May go negative under Despondent.
    pub fn hit_dexterity(&self) -> i32 {
        self.effective(StatKind::Dexterity) - self.status.dexterity_penalty()
    }

    pub fn derived(&self, config: &GameConfig) -> DerivedStats {
        DerivedStats::compute(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Inventory;
    use crate::state::{EquipSlot, EquipmentItem, StatusKind};

    #[test]
    fn player_attack_includes_flat_base() {
        let mut profile = PlayerProfile::new("Ada");
        profile.base.strength = 10;
        let player = Combatant::from_profile(EntityId::PLAYER, &profile, &GameConfig::default());
        assert_eq!(player.effective_attack(), 13);
    }

    #[test]
    fn enemy_attack_equals_template_attack() {
        let golem = EnemyTypeDef::new("rust_golem", "Rust Golem", 25, 7, 4);
        let enemy = Combatant::from_enemy(EntityId::enemy(0), &golem);
        assert_eq!(enemy.effective_attack(), 7);
        assert_eq!(enemy.effective_defense(), 4);
        assert_eq!(enemy.hp.current(), 25);
    }

    #[test]
    fn equipment_and_modifiers_stack_on_base() {
        let mut profile = PlayerProfile::new("Ada");
        profile.inventory.stow(
            EquipmentItem::new("copper_plating", "Copper Plating", EquipSlot::Armor)
                .with_bonus(StatKind::Resilience, 2),
        );
        profile.equip(EquipSlot::Armor, &"copper_plating".into()).unwrap();

        let mut player = Combatant::from_profile(EntityId::PLAYER, &profile, &GameConfig::default());
        player.modifiers.add_battle(StatKind::Resilience, 3);
        assert_eq!(player.effective_defense(), 3 + 2 + 3);

        player.modifiers.replace_debuffs(&[StatKind::Resilience], 20, 3);
        assert_eq!(player.effective_defense(), 0);
    }

    #[test]
    fn burn_and_despondent_penalties() {
        let profile = PlayerProfile::new("Ada");
        let mut player = Combatant::from_profile(EntityId::PLAYER, &profile, &GameConfig::default());
        player.status.apply(StatusKind::Burn, 3);
        player.status.apply(StatusKind::Despondent, 3);

        assert_eq!(player.effective_attack(), 3 + 5 - 2);
        assert_eq!(player.hit_dexterity(), 5 - 4);
        assert_eq!(player.effective(StatKind::Dexterity), 5);
    }

    #[test]
    fn derived_sheet_reflects_intelligence_and_statuses() {
        let mut profile = PlayerProfile::new("Ada");
        profile.base.intelligence = 9;
        profile.base.constitution = 6;
        let mut player = Combatant::from_profile(EntityId::PLAYER, &profile, &GameConfig::default());
        player.status.apply(StatusKind::Despondent, 3);

        let sheet = player.derived(&GameConfig::default());
        assert_eq!(sheet.attack, 8);
        assert_eq!(sheet.defense, 3);
        assert_eq!(sheet.hit_dexterity, 1);
        assert!((sheet.skill_damage_multiplier - 1.3).abs() < 1e-9);
        assert_eq!(sheet.debuff_reduction, 1);
        assert_eq!(sheet.sp_regen, 3);
        assert_eq!(sheet.base_hit_chance, 0.85);
    }
}
