//! Persisted player state.
//!
//! The profile is what the persistence collaborator saves and loads. Battles
//! never hold a reference to it: they copy it into a [`Combatant`] and the
//! runtime writes HP/SP back through [`PlayerProfile::flush`] once the battle
//! reaches a terminal state. Status effects and temporary modifiers are never
//! persisted.

use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::env::Inventory;
use crate::error::CombatError;
use crate::stats::{BaseStats, StatKind};

use super::{Combatant, EquipSlot, Equipment, InventoryState, ItemId, QuestLog, SkillBook};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub name: String,
    pub base: BaseStats,
    pub hp: u32,
    pub sp: u32,
    pub level: u32,
    /// Cumulative XP, never reset on level-up.
    pub xp: u32,
    pub money: u32,
    pub stat_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: SkillBook,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: InventoryState,
    /// Scripted encounters already won; they never trigger again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cleared_encounters: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quests: QuestLog,
}

impl PlayerProfile {
    /// Level 1 profile with starting stats and full HP/SP.
    pub fn new(name: impl Into<String>) -> Self {
        let base = BaseStats::default();
        Self {
            name: name.into(),
            base,
            hp: base.max_hp.max(0) as u32,
            sp: base.max_sp.max(0) as u32,
            level: 1,
            xp: 0,
            money: 0,
            stat_points: 0,
            skills: SkillBook::new(),
            equipment: Equipment::empty(),
            inventory: InventoryState::new(),
            cleared_encounters: BTreeSet::new(),
            quests: QuestLog::new(),
        }
    }

    /// Base plus equipment, clamped at 0. Temporary modifiers only exist in battle.
    pub fn effective(&self, stat: StatKind) -> i32 {
        (self.base.get(stat) + self.equipment.bonus(stat)).max(0)
    }

    pub fn max_hp(&self) -> u32 {
        self.effective(StatKind::MaxHp) as u32
    }

    pub fn max_sp(&self) -> u32 {
        self.effective(StatKind::MaxSp) as u32
    }

    /// Re-clamps current HP/SP after a maximum changed.
    pub fn clamp_resources(&mut self) {
        self.hp = self.hp.min(self.max_hp());
        self.sp = self.sp.min(self.max_sp());
    }

    /// Writes a battle's final HP/SP back. The only path from battle to profile.
    pub fn flush(&mut self, combatant: &Combatant) {
        self.hp = combatant.hp.current().min(self.max_hp());
        self.sp = combatant.sp.current().min(self.max_sp());
    }

    /// XP earned since reaching the current level.
    pub fn xp_into_level(&self, config: &GameConfig) -> u32 {
        self.xp
            .saturating_sub(self.level.saturating_sub(1).saturating_mul(config.xp_per_level))
    }

    /// XP still needed for the next level.
    pub fn xp_to_next_level(&self, config: &GameConfig) -> u32 {
        config.xp_threshold(self.level).saturating_sub(self.xp)
    }

    /// Equips an item from the profile's own inventory.
    ///
    /// # Errors
    ///
    /// See [`Equipment::equip`].
    pub fn equip(&mut self, slot: EquipSlot, id: &ItemId) -> Result<Option<ItemId>, CombatError> {
        let displaced = self.equipment.equip(slot, id, &mut self.inventory)?;
        self.clamp_resources();
        Ok(displaced)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<ItemId> {
        let removed = self.equipment.unequip(slot, &mut self.inventory);
        self.clamp_resources();
        removed
    }

    /// Sells an equipment item for half its price, unequipping it first.
    ///
    /// # Errors
    ///
    /// [`CombatError::ItemUnavailable`] when the profile owns no such item.
    pub fn sell_equipment(&mut self, id: &ItemId) -> Result<u32, CombatError> {
        let item = self.remove_equipment(id)?;
        let proceeds = item.price / 2;
        self.money = self.money.saturating_add(proceeds);
        Ok(proceeds)
    }

    /// Destroys an equipment item, unequipping it first.
    ///
    /// # Errors
    ///
    /// [`CombatError::ItemUnavailable`] when the profile owns no such item.
    pub fn discard_equipment(&mut self, id: &ItemId) -> Result<(), CombatError> {
        self.remove_equipment(id).map(|_| ())
    }

    fn remove_equipment(&mut self, id: &ItemId) -> Result<super::EquipmentItem, CombatError> {
        if self.inventory.peek_equipment(id).is_none() {
            if let Some(slot) = self.equipment.slot_of(id) {
                self.unequip(slot);
            }
        }
        self.inventory
            .take_equipment(id)
            .ok_or_else(|| CombatError::ItemUnavailable(id.clone()))
    }

    pub fn mark_cleared(&mut self, encounter: impl Into<String>) -> bool {
        self.cleared_encounters.insert(encounter.into())
    }

    pub fn is_cleared(&self, encounter: &str) -> bool {
        self.cleared_encounters.contains(encounter)
    }
}
