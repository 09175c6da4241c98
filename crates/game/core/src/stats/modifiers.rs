//! Temporary stat modifiers granted by skills and items during a battle.
//!
//! These are tracked apart from status effects: Burn's attack reduction lives
//! on the status instance, while a skill debuff lives here. Expiry of one never
//! touches the other.

use super::core::StatKind;

/// Where a temporary modifier came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    /// Self-buff from a skill; a newer buff on the same stat replaces it.
    SkillBuff,
    /// Debuff from an opposing skill; a newer skill debuff replaces all of them.
    SkillDebuff,
    /// Consumable buff that lasts until the battle ends. Stacks.
    Item,
}

/// A single timed or battle-long delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub delta: i32,
    pub source: ModifierSource,
    /// Turns left; `None` lasts for the rest of the battle.
    pub remaining: Option<u32>,
}

/// Active temporary modifiers on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    entries: Vec<StatModifier>,
}

impl StatModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all active deltas for `stat`.
    pub fn total(&self, stat: StatKind) -> i32 {
        self.entries
            .iter()
            .filter(|m| m.stat == stat)
            .map(|m| m.delta)
            .sum()
    }

    /// Installs a skill buff, replacing any earlier skill buff on the same stat.
    pub fn set_buff(&mut self, stat: StatKind, delta: i32, turns: u32) {
        self.entries
            .retain(|m| !(m.source == ModifierSource::SkillBuff && m.stat == stat));
        self.entries.push(StatModifier {
            stat,
            delta,
            source: ModifierSource::SkillBuff,
            remaining: Some(turns),
        });
    }

    /// Replaces every skill debuff with the given reductions.
    ///
    /// `amount` is the positive magnitude; it is stored as a negative delta.
    pub fn replace_debuffs(&mut self, stats: &[StatKind], amount: i32, turns: u32) {
        self.entries
            .retain(|m| m.source != ModifierSource::SkillDebuff);
        for &stat in stats {
            self.entries.push(StatModifier {
                stat,
                delta: -amount,
                source: ModifierSource::SkillDebuff,
                remaining: Some(turns),
            });
        }
    }

    /// Adds a battle-long item modifier.
    pub fn add_battle(&mut self, stat: StatKind, delta: i32) {
        self.entries.push(StatModifier {
            stat,
            delta,
            source: ModifierSource::Item,
            remaining: None,
        });
    }

    /// Decrements timed modifiers and returns the ones that expired.
    pub fn tick(&mut self) -> Vec<StatModifier> {
        let mut expired = Vec::new();
        self.entries.retain_mut(|m| match m.remaining.as_mut() {
            Some(turns) => {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(*m);
                    false
                } else {
                    true
                }
            }
            None => true,
        });
        expired
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatModifier> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_debuff_replaces_previous_skill_debuffs() {
        let mut mods = StatModifiers::new();
        mods.replace_debuffs(&[StatKind::Strength, StatKind::Resilience], 2, 3);
        mods.replace_debuffs(&[StatKind::Strength], 3, 3);

        assert_eq!(mods.total(StatKind::Strength), -3);
        assert_eq!(mods.total(StatKind::Resilience), 0);
    }

    #[test]
    fn item_modifiers_survive_ticks_and_stack() {
        let mut mods = StatModifiers::new();
        mods.add_battle(StatKind::Resilience, 3);
        mods.add_battle(StatKind::Resilience, 3);
        mods.set_buff(StatKind::Resilience, 4, 1);

        assert_eq!(mods.total(StatKind::Resilience), 10);
        let expired = mods.tick();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].source, ModifierSource::SkillBuff);
        assert_eq!(mods.total(StatKind::Resilience), 6);
    }

    #[test]
    fn rebuffing_refreshes_instead_of_stacking() {
        let mut mods = StatModifiers::new();
        mods.set_buff(StatKind::Resilience, 4, 3);
        mods.tick();
        mods.set_buff(StatKind::Resilience, 4, 3);

        assert_eq!(mods.total(StatKind::Resilience), 4);
        assert_eq!(mods.iter().next().and_then(|m| m.remaining), Some(3));
    }
}
