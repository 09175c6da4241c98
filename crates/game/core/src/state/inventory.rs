use std::collections::BTreeMap;

use crate::env::Inventory;

use super::{EquipmentItem, ItemId};

/// In-memory bag: unequipped equipment plus consumable counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    #[cfg_attr(feature = "serde", serde(default))]
    equipment: Vec<EquipmentItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    consumables: BTreeMap<ItemId, u32>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_consumable(&mut self, id: impl Into<ItemId>, count: u32) {
        if count == 0 {
            return;
        }
        *self.consumables.entry(id.into()).or_insert(0) += count;
    }

    pub fn equipment(&self) -> impl Iterator<Item = &EquipmentItem> {
        self.equipment.iter()
    }

    pub fn consumables(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.consumables.iter().map(|(id, count)| (id, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty() && self.consumables.is_empty()
    }
}

impl Inventory for InventoryState {
    fn stow(&mut self, item: EquipmentItem) {
        self.equipment.push(item);
    }

    fn peek_equipment(&self, id: &ItemId) -> Option<&EquipmentItem> {
        self.equipment.iter().find(|item| &item.id == id)
    }

    fn take_equipment(&mut self, id: &ItemId) -> Option<EquipmentItem> {
        let index = self.equipment.iter().position(|item| &item.id == id)?;
        Some(self.equipment.remove(index))
    }

    fn count(&self, id: &ItemId) -> u32 {
        let equipment = self.equipment.iter().filter(|item| &item.id == id).count() as u32;
        equipment + self.consumables.get(id).copied().unwrap_or(0)
    }

    fn take_consumable(&mut self, id: &ItemId) -> bool {
        let Some(count) = self.consumables.get_mut(id) else {
            return false;
        };
        if *count == 0 {
            self.consumables.remove(id);
            return false;
        }
        *count -= 1;
        if *count == 0 {
            self.consumables.remove(id);
        }
        true
    }
}
