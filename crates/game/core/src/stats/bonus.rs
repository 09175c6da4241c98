//! Sparse stat-bonus vectors carried by equipment.

use std::collections::BTreeMap;

use super::core::StatKind;

/// Sparse mapping `stat -> delta`.
///
/// Absent stats contribute 0. Zero deltas are dropped on insert so two vectors
/// with the same effect compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatBonuses {
    entries: BTreeMap<StatKind, i32>,
}

impl StatBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, stat: StatKind, delta: i32) -> Self {
        self.add(stat, delta);
        self
    }

    /// Adds `delta` to the bonus for `stat`.
    pub fn add(&mut self, stat: StatKind, delta: i32) {
        let entry = self.entries.entry(stat).or_insert(0);
        *entry += delta;
        if *entry == 0 {
            self.entries.remove(&stat);
        }
    }

    pub fn get(&self, stat: StatKind) -> i32 {
        self.entries.get(&stat).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        self.entries.iter().map(|(stat, delta)| (*stat, *delta))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(StatKind, i32)> for StatBonuses {
    fn from_iter<T: IntoIterator<Item = (StatKind, i32)>>(iter: T) -> Self {
        let mut bonuses = Self::new();
        for (stat, delta) in iter {
            bonuses.add(stat, delta);
        }
        bonuses
    }
}
