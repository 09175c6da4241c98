//! Encounter sources handed to the session by the map layer.
//!
//! Scripted encounters are fixed enemy placements that never trigger again
//! once won. Random encounters are rolled per step from an area's
//! [`EncounterTable`].

use game_core::{EnemyTypeId, ItemId, RngOracle};
use serde::{Deserialize, Serialize};

/// A fixed enemy placement on a map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedEncounter {
    /// Stable id recorded in the profile once the encounter is won.
    pub id: String,
    pub enemies: Vec<EnemyTypeId>,
}

impl ScriptedEncounter {
    pub fn new(id: impl Into<String>, enemies: impl IntoIterator<Item = EnemyTypeId>) -> Self {
        Self {
            id: id.into(),
            enemies: enemies.into_iter().collect(),
        }
    }
}

/// Random encounter table for one map area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterTable {
    /// Probability that one step triggers a battle.
    pub encounter_chance: f64,
    /// Candidate enemy groups, picked uniformly.
    pub groups: Vec<Vec<EnemyTypeId>>,
}

impl EncounterTable {
    pub fn new(encounter_chance: f64) -> Self {
        Self {
            encounter_chance,
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl IntoIterator<Item = EnemyTypeId>) -> Self {
        self.groups.push(group.into_iter().collect());
        self
    }

    /// Rolls one step. Draws once for the trigger and, on success, once more
    /// for the group.
    pub fn roll(&self, rng: &mut dyn RngOracle) -> Option<&[EnemyTypeId]> {
        if self.groups.is_empty() || !rng.roll(self.encounter_chance) {
            return None;
        }
        let index = rng.pick(self.groups.len());
        self.groups.get(index).map(Vec::as_slice)
    }
}

/// Bonus consumable from a scrap pickup: `chance` to receive one item picked
/// uniformly from `pool`.
pub fn roll_bonus_drop<'p>(
    rng: &mut dyn RngOracle,
    chance: f64,
    pool: &'p [ItemId],
) -> Option<&'p ItemId> {
    if pool.is_empty() || !rng.roll(chance) {
        return None;
    }
    pool.get(rng.pick(pool.len()))
}
