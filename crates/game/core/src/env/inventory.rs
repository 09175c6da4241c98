use crate::state::{EquipmentItem, ItemId};

/// Inventory collaborator seen by the equipment model and the Item action.
///
/// Equipment is stored as whole items so an unequipped piece keeps its bonus
/// vector. Consumables are counted by id; their effects live in the
/// [`ItemOracle`](super::ItemOracle).
pub trait Inventory {
    /// Returns an equipment item to the bag.
    fn stow(&mut self, item: EquipmentItem);

    /// Looks at a stored equipment item without removing it.
    fn peek_equipment(&self, id: &ItemId) -> Option<&EquipmentItem>;

    /// Removes one stored equipment item with this id.
    fn take_equipment(&mut self, id: &ItemId) -> Option<EquipmentItem>;

    /// Number of copies held, equipment and consumables alike.
    fn count(&self, id: &ItemId) -> u32;

    /// Consumes one consumable. Returns false when none is held.
    fn take_consumable(&mut self, id: &ItemId) -> bool;
}
