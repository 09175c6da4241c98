//! Mutable game state: battle participants and the persisted player profile.
//!
//! - [`Combatant`]: working copy used inside one battle
//! - [`PlayerProfile`]: persisted shape written back after terminal states
//! - [`Equipment`], [`InventoryState`], [`SkillBook`], [`StatusEffects`]:
//!   the pieces both of them are built from
//! - [`QuestLog`]: quest progress, persisted with the profile
mod combatant;
mod common;
mod equipment;
mod inventory;
mod profile;
mod quest_log;
mod skill_book;
mod status;

pub use combatant::{Combatant, CombatantKind};
pub use common::{EnemyTypeId, EntityId, ItemId, QuestId, SkillId};
pub use equipment::{EquipSlot, Equipment, EquipmentItem};
pub use inventory::InventoryState;
pub use profile::PlayerProfile;
pub use quest_log::{QuestEntry, QuestLog, QuestState};
pub use skill_book::SkillBook;
pub use status::{StatusEffect, StatusEffects, StatusKind};
