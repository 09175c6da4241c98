//! Combat result types and attack resolution.

use crate::config::HitChanceParams;
use crate::env::RngOracle;
use crate::state::{Combatant, StatusKind};

use super::damage::{ability_damage, calculate_damage};
use super::hit::{check_hit, hit_chance};

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack missed the target.
    Miss,
    /// Attack hit the target.
    Hit,
    /// Special ability triggered instead of a plain attack.
    Ability,
}

/// Result of a combat resolution, before defend is taken into account.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,

    /// Damage to deal; 0 on a miss.
    pub damage: u32,

    /// Status inflicted by a triggered ability.
    pub inflicts: Option<StatusKind>,
}

impl AttackResult {
    pub const MISS: Self = Self {
        outcome: AttackOutcome::Miss,
        damage: 0,
        inflicts: None,
    };

    pub fn landed(&self) -> bool {
        !matches!(self.outcome, AttackOutcome::Miss)
    }
}

/// Resolve one attack from `attacker` against `defender`.
///
/// Draw order: the ability roll first (only when the attacker has an
/// ability), then the hit roll if the ability did not trigger. A triggered
/// ability skips the hit roll.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut dyn RngOracle,
    params: &HitChanceParams,
) -> AttackResult {
    let normal = calculate_damage(attacker.effective_attack(), defender.effective_defense());

    if let Some(ability) = &attacker.ability {
        if rng.roll(ability.chance) {
            return AttackResult {
                outcome: AttackOutcome::Ability,
                damage: ability_damage(normal),
                inflicts: Some(ability.inflicts),
            };
        }
    }

    let chance = hit_chance(attacker, defender, params);
    if !check_hit(chance, rng.next_f64()) {
        return AttackResult::MISS;
    }

    AttackResult {
        outcome: AttackOutcome::Hit,
        damage: normal,
        inflicts: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{EnemyTypeDef, ScriptedRng};
    use crate::state::{EntityId, PlayerProfile};

    fn player_with_strength(strength: i32) -> Combatant {
        let mut profile = PlayerProfile::new("Ada");
        profile.base.strength = strength;
        Combatant::from_profile(EntityId::PLAYER, &profile, &GameConfig::default())
    }

    #[test]
    fn hit_deals_attack_minus_defense() {
        let attacker = player_with_strength(10);
        let mut def = EnemyTypeDef::new("dummy", "Dummy", 50, 0, 5);
        def.dexterity = 5;
        let defender = Combatant::from_enemy(EntityId::enemy(0), &def);
        let mut rng = ScriptedRng::new([0.5]);

        let result = resolve_attack(&attacker, &defender, &mut rng, &HitChanceParams::default());

        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert_eq!(result.damage, 8);
    }

    #[test]
    fn high_draw_misses() {
        let attacker = player_with_strength(10);
        let defender = Combatant::from_enemy(
            EntityId::enemy(0),
            &EnemyTypeDef::new("dummy", "Dummy", 50, 0, 5),
        );
        let mut rng = ScriptedRng::new([0.995]);
        let result = resolve_attack(&attacker, &defender, &mut rng, &HitChanceParams::default());
        assert_eq!(result, AttackResult::MISS);
    }

    #[test]
    fn triggered_ability_halves_damage_and_skips_hit_roll() {
        let wraith = EnemyTypeDef::new("volt_wraith", "Volt Wraith", 20, 10, 2).with_ability(
            "Static Shock",
            StatusKind::Stun,
            0.3,
        );
        let attacker = Combatant::from_enemy(EntityId::enemy(0), &wraith);
        let defender = player_with_strength(5);
        let mut rng = ScriptedRng::new([0.1, 0.999]);

        let result = resolve_attack(&attacker, &defender, &mut rng, &HitChanceParams::default());

        assert_eq!(result.outcome, AttackOutcome::Ability);
        // normal = 10 - 3 = 7, halved = 3
        assert_eq!(result.damage, 3);
        assert_eq!(result.inflicts, Some(StatusKind::Stun));
        assert_eq!(rng.remaining(), 1);
    }
}
