//! Equipment slots and equippable items.
//!
//! A slot holds at most one item. Equipping into an occupied slot first
//! returns the occupant to the inventory, so no slot is ever doubly filled and
//! no item is ever held by two owners.

use crate::env::Inventory;
use crate::error::CombatError;
use crate::stats::{StatBonuses, StatKind};

use super::ItemId;

/// The three equipment slots.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 3] = [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory];
}

/// An equippable item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentItem {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: StatBonuses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: u32,
}

impl EquipmentItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, slot: EquipSlot) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot,
            bonuses: StatBonuses::new(),
            price: 0,
        }
    }

    pub fn with_bonus(mut self, stat: StatKind, delta: i32) -> Self {
        self.bonuses.add(stat, delta);
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }
}

/// Items currently worn by a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<EquipmentItem>,
    pub armor: Option<EquipmentItem>,
    pub accessory: Option<EquipmentItem>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&EquipmentItem> {
        self.slot(slot).as_ref()
    }

    fn slot(&self, slot: EquipSlot) -> &Option<EquipmentItem> {
        match slot {
            EquipSlot::Weapon => &self.weapon,
            EquipSlot::Armor => &self.armor,
            EquipSlot::Accessory => &self.accessory,
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EquipmentItem> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    /// Sum of bonuses to `stat` across all slots.
    pub fn bonus(&self, stat: StatKind) -> i32 {
        self.iter().map(|item| item.bonuses.get(stat)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentItem> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .flatten()
    }

    /// Slot currently holding the item with this id.
    pub fn slot_of(&self, id: &ItemId) -> Option<EquipSlot> {
        EquipSlot::ALL
            .into_iter()
            .find(|slot| self.get(*slot).is_some_and(|item| &item.id == id))
    }

    /// Moves an item from the inventory into `slot`.
    ///
    /// Fails without touching anything when the item is not in the inventory
    /// or belongs to another slot. A displaced item is stowed and its id
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`CombatError::ItemUnavailable`] when the inventory holds no such item
    /// - [`CombatError::InvalidSlot`] when the item's slot differs from `slot`
    pub fn equip(
        &mut self,
        slot: EquipSlot,
        id: &ItemId,
        inventory: &mut dyn Inventory,
    ) -> Result<Option<ItemId>, CombatError> {
        let found = inventory
            .peek_equipment(id)
            .map(|item| item.slot)
            .ok_or_else(|| CombatError::ItemUnavailable(id.clone()))?;
        if found != slot {
            return Err(CombatError::InvalidSlot {
                expected: slot,
                found,
            });
        }
        let item = inventory
            .take_equipment(id)
            .ok_or_else(|| CombatError::ItemUnavailable(id.clone()))?;

        let displaced = self.slot_mut(slot).replace(item);
        Ok(displaced.map(|previous| {
            let previous_id = previous.id.clone();
            inventory.stow(previous);
            previous_id
        }))
    }

    /// Returns the item in `slot` to the inventory. Empty slots are a no-op.
    pub fn unequip(&mut self, slot: EquipSlot, inventory: &mut dyn Inventory) -> Option<ItemId> {
        let item = self.slot_mut(slot).take()?;
        let id = item.id.clone();
        inventory.stow(item);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InventoryState;

    fn wrench() -> EquipmentItem {
        EquipmentItem::new("pipe_wrench", "Pipe Wrench", EquipSlot::Weapon)
            .with_bonus(StatKind::Strength, 2)
    }

    fn cutter() -> EquipmentItem {
        EquipmentItem::new("arc_cutter", "Arc Cutter", EquipSlot::Weapon)
            .with_bonus(StatKind::Strength, 4)
    }

    #[test]
    fn equipping_second_weapon_returns_the_first() {
        let mut inventory = InventoryState::new();
        inventory.stow(wrench());
        inventory.stow(cutter());
        let mut equipment = Equipment::empty();

        equipment
            .equip(EquipSlot::Weapon, &"pipe_wrench".into(), &mut inventory)
            .unwrap();
        let before = inventory.count(&"pipe_wrench".into());

        let displaced = equipment
            .equip(EquipSlot::Weapon, &"arc_cutter".into(), &mut inventory)
            .unwrap();

        assert_eq!(displaced, Some(ItemId::from("pipe_wrench")));
        assert_eq!(inventory.count(&"pipe_wrench".into()), before + 1);
        assert_eq!(inventory.count(&"arc_cutter".into()), 0);
        assert_eq!(equipment.iter().count(), 1);
        assert_eq!(equipment.bonus(StatKind::Strength), 4);
    }

    #[test]
    fn wrong_slot_is_rejected_without_mutation() {
        let mut inventory = InventoryState::new();
        inventory.stow(wrench());
        let mut equipment = Equipment::empty();

        let err = equipment
            .equip(EquipSlot::Armor, &"pipe_wrench".into(), &mut inventory)
            .unwrap_err();

        assert_eq!(
            err,
            CombatError::InvalidSlot {
                expected: EquipSlot::Armor,
                found: EquipSlot::Weapon,
            }
        );
        assert_eq!(inventory.count(&"pipe_wrench".into()), 1);
        assert!(equipment.get(EquipSlot::Armor).is_none());
    }

    #[test]
    fn unequipping_empty_slot_is_noop() {
        let mut inventory = InventoryState::new();
        let mut equipment = Equipment::empty();
        assert_eq!(equipment.unequip(EquipSlot::Accessory, &mut inventory), None);
    }
}
