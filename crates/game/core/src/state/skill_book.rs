use std::collections::BTreeSet;

use crate::env::SkillDef;

use super::SkillId;

/// Unlocked skills and unspent skill points of a player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBook {
    #[cfg_attr(feature = "serde", serde(default))]
    unlocked: BTreeSet<SkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    points: u32,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(points: u32) -> Self {
        Self {
            unlocked: BTreeSet::new(),
            points,
        }
    }

    pub fn is_unlocked(&self, id: &SkillId) -> bool {
        self.unlocked.contains(id)
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn grant_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &SkillId> {
        self.unlocked.iter()
    }

    /// A skill is castable when unlocked and its prerequisite (if any, and
    /// above tier 0) is unlocked too.
    pub fn can_cast(&self, skill: &SkillDef) -> bool {
        if !self.is_unlocked(&skill.id) {
            return false;
        }
        if skill.tier == 0 {
            return true;
        }
        skill
            .prerequisite
            .as_ref()
            .is_none_or(|prerequisite| self.is_unlocked(prerequisite))
    }

    /// Records an unlock and deducts its cost. Callers validate first.
    pub(crate) fn record_unlock(&mut self, id: SkillId, cost: u32) {
        self.points -= cost;
        self.unlocked.insert(id);
    }

    /// Marks a skill unlocked without spending points (starting kits, tests).
    pub fn grant(&mut self, id: impl Into<SkillId>) {
        self.unlocked.insert(id.into());
    }
}
