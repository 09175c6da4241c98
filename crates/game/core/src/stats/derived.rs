//! Derived combat values.
//!
//! Never stored: every value here is recomputed from effective stats when it
//! is needed, so equipment swaps and expiring modifiers are always reflected.
//!
//! ```text
//! debuff_reduction         = max(0, (CON - 3) / 3)
//! debuff_duration          = max(1, base - debuff_reduction)
//! skill_damage_multiplier  = 1.0 + (INT - 3) * 0.05
//! sp_regen                 = 1 + max(0, (INT - 3) / 3)
//! ```

use crate::config::GameConfig;
use crate::state::Combatant;

use super::core::StatKind;

/// Stat value at which Constitution and Intelligence stop being neutral.
const NEUTRAL_STAT: i32 = 3;

/// Turns shaved off a debuff applied to a combatant with this Constitution.
pub fn debuff_reduction(constitution: i32) -> u32 {
    ((constitution - NEUTRAL_STAT) / 3).max(0) as u32
}

/// Duration of a debuff after Constitution reduction. Never below one turn.
pub fn debuff_duration(base_turns: u32, constitution: i32) -> u32 {
    base_turns
        .saturating_sub(debuff_reduction(constitution))
        .max(1)
}

pub fn skill_damage_multiplier(intelligence: i32) -> f64 {
    1.0 + f64::from(intelligence - NEUTRAL_STAT) * 0.05
}

/// SP regenerated at the end of each turn.
pub fn sp_regen(intelligence: i32) -> u32 {
    1 + ((intelligence - NEUTRAL_STAT) / 3).max(0) as u32
}

/// Read-only sheet of derived values, for display and diagnostics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub attack: i32,
    pub defense: i32,
    /// Dexterity used by the hit formula, after Despondent.
    pub hit_dexterity: i32,
    pub skill_damage_multiplier: f64,
    pub debuff_reduction: u32,
    pub sp_regen: u32,
    /// Hit chance against a defender with equal dexterity.
    pub base_hit_chance: f64,
}

impl DerivedStats {
    pub fn compute(combatant: &Combatant, config: &GameConfig) -> Self {
        let int = combatant.effective(StatKind::Intelligence);
        let params = config.hit_chance;
        Self {
            attack: combatant.effective_attack(),
            defense: combatant.effective_defense(),
            hit_dexterity: combatant.hit_dexterity(),
            skill_damage_multiplier: skill_damage_multiplier(int),
            debuff_reduction: debuff_reduction(combatant.effective(StatKind::Constitution)),
            sp_regen: sp_regen(int),
            base_hit_chance: params.base.clamp(params.min, params.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constitution_shortens_debuffs_but_never_below_one() {
        assert_eq!(debuff_duration(3, 3), 3);
        assert_eq!(debuff_duration(3, 6), 2);
        assert_eq!(debuff_duration(3, 9), 1);
        assert_eq!(debuff_duration(3, 30), 1);
        assert_eq!(debuff_duration(1, 0), 1);
    }

    #[test]
    fn intelligence_scaling() {
        assert_eq!(skill_damage_multiplier(3), 1.0);
        assert!((skill_damage_multiplier(7) - 1.2).abs() < 1e-9);
        assert_eq!(sp_regen(3), 1);
        assert_eq!(sp_regen(6), 2);
        assert_eq!(sp_regen(0), 1);
    }
}
