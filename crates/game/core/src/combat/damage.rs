//! Damage calculation.

/// Damage of a landed hit.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack - defense)
/// ```
pub fn calculate_damage(attack: i32, defense: i32) -> u32 {
    (attack - defense).max(1) as u32
}

/// Damage of a triggered special ability: half the normal damage, at least 1.
pub fn ability_damage(normal: u32) -> u32 {
    (normal / 2).max(1)
}

/// Damage taken by a defending combatant.
pub fn defended_damage(damage: u32, divisor: u32) -> u32 {
    (damage / divisor.max(1)).max(1)
}
