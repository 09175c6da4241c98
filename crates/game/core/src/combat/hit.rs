//! Hit chance and accuracy calculations.

use crate::config::HitChanceParams;
use crate::state::Combatant;

/// Calculate hit chance from attacker and defender dexterity.
///
/// # Formula
///
/// ```text
/// hit_chance = base + per_dex * (attacker_dex - defender_dex)
/// clamped to [min, max]
/// ```
///
/// With default parameters the result always lies in `[0.30, 0.99]`.
pub fn calculate_hit_chance(attacker_dex: i32, defender_dex: i32, params: &HitChanceParams) -> f64 {
    let diff = f64::from(attacker_dex) - f64::from(defender_dex);
    (params.base + params.per_dex * diff).clamp(params.min, params.max)
}

/// Hit chance between two combatants, using Despondent-adjusted dexterity.
pub fn hit_chance(attacker: &Combatant, defender: &Combatant, params: &HitChanceParams) -> f64 {
    calculate_hit_chance(attacker.hit_dexterity(), defender.hit_dexterity(), params)
}

/// An attack hits when the uniform draw falls below the hit chance.
#[inline]
pub fn check_hit(chance: f64, draw: f64) -> bool {
    draw < chance
}
