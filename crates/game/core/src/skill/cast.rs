//! Skill casting.
//!
//! ```text
//! value = floor(base_value + scaling * effective(scaling_stat))   (>= 1 except cure)
//! ```
//!
//! Validation runs before anything is spent, so a rejected cast leaves caster
//! and target exactly as they were.

use crate::config::GameConfig;
use crate::env::{SkillDef, SkillEffectKind};
use crate::error::CombatError;
use crate::state::{Combatant, SkillId, StatusKind};
use crate::stats::StatKind;

/// What a successful cast did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastOutcome {
    pub skill: SkillId,
    pub effect: SkillEffectKind,
    /// Computed skill value before clamping against HP.
    pub value: u32,
    /// HP actually removed or restored; 0 for buffs, debuffs and cures.
    pub applied: u32,
    /// Turns a buff or debuff lasts; 0 for instant effects.
    pub turns: u32,
    /// Status kinds removed by a cure.
    pub cured: Vec<StatusKind>,
}

/// Checks whether `caster` may cast `skill` at `target` right now.
///
/// # Errors
///
/// - [`CombatError::NotUnlocked`] when the skill (or its prerequisite) is locked
/// - [`CombatError::InsufficientSp`] when SP is below the cost
/// - [`CombatError::InvalidTarget`] when an offensive skill has no living target
pub fn validate_cast(
    caster: &Combatant,
    target: Option<&Combatant>,
    skill: &SkillDef,
) -> Result<(), CombatError> {
    if !caster.skills.can_cast(skill) {
        return Err(CombatError::NotUnlocked(skill.id.clone()));
    }
    if caster.sp.current() < skill.sp_cost {
        return Err(CombatError::InsufficientSp {
            needed: skill.sp_cost,
            available: caster.sp.current(),
        });
    }
    if skill.effect.targets_enemy() {
        match target {
            Some(target) if target.is_alive() => {}
            Some(target) => return Err(CombatError::InvalidTarget(target.id)),
            None => return Err(CombatError::InvalidTarget(caster.id)),
        }
    }
    Ok(())
}

/// Casts `skill`, spending SP and applying its effect.
///
/// `target` is only consulted by offensive kinds; heal, buff and cure always
/// land on the caster.
///
/// # Errors
///
/// See [`validate_cast`].
pub fn cast(
    caster: &mut Combatant,
    mut target: Option<&mut Combatant>,
    skill: &SkillDef,
    config: &GameConfig,
) -> Result<CastOutcome, CombatError> {
    validate_cast(caster, target.as_deref(), skill)?;

    if !caster.sp.try_spend(skill.sp_cost) {
        return Err(CombatError::InsufficientSp {
            needed: skill.sp_cost,
            available: caster.sp.current(),
        });
    }

    let stat_value = skill
        .scaling_stat
        .stat()
        .map_or(0, |stat| caster.effective(stat));
    let value = skill.value(stat_value);
    let duration = skill.duration.unwrap_or(config.skill_debuff_turns).max(1);

    let mut outcome = CastOutcome {
        skill: skill.id.clone(),
        effect: skill.effect,
        value,
        applied: 0,
        turns: 0,
        cured: Vec::new(),
    };

    match skill.effect {
        SkillEffectKind::Damage => {
            if let Some(target) = target.as_deref_mut() {
                outcome.applied = target.hp.damage(value);
            }
        }
        SkillEffectKind::Drain => {
            if let Some(target) = target.as_deref_mut() {
                let dealt = target.hp.damage(value);
                caster.hp.heal(dealt);
                outcome.applied = dealt;
            }
        }
        SkillEffectKind::Heal => {
            outcome.applied = caster.hp.heal(value);
        }
        SkillEffectKind::BuffDefense => {
            caster
                .modifiers
                .set_buff(StatKind::Resilience, value as i32, duration);
            outcome.turns = duration;
        }
        SkillEffectKind::DebuffAttack => {
            if let Some(target) = target.as_deref_mut() {
                target
                    .modifiers
                    .replace_debuffs(&[StatKind::Strength], value as i32, duration);
                outcome.turns = duration;
            }
        }
        SkillEffectKind::DebuffBoth => {
            if let Some(target) = target.as_deref_mut() {
                target.modifiers.replace_debuffs(
                    &[StatKind::Strength, StatKind::Resilience],
                    value as i32,
                    duration,
                );
                outcome.turns = duration;
            }
        }
        SkillEffectKind::CureStatus => {
            outcome.cured = caster.status.clear();
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EnemyTypeDef, ScalingStat};
    use crate::state::{EntityId, PlayerProfile};

    fn caster_with(skill: &str, sp: u32) -> Combatant {
        let mut profile = PlayerProfile::new("Ada");
        profile.skills.grant(skill);
        profile.sp = sp;
        Combatant::from_profile(EntityId::PLAYER, &profile, &GameConfig::default())
    }

    fn golem() -> Combatant {
        Combatant::from_enemy(
            EntityId::enemy(0),
            &EnemyTypeDef::new("rust_golem", "Rust Golem", 25, 7, 4),
        )
    }

    #[test]
    fn insufficient_sp_mutates_nothing() {
        let skill = SkillDef::new("voltage_surge", 4, SkillEffectKind::Damage, 10);
        let mut caster = caster_with("voltage_surge", 3);
        let mut target = golem();
        let (caster_before, target_before) = (caster.clone(), target.clone());

        let err = cast(&mut caster, Some(&mut target), &skill, &GameConfig::default()).unwrap_err();

        assert_eq!(
            err,
            CombatError::InsufficientSp {
                needed: 4,
                available: 3,
            }
        );
        assert_eq!(caster, caster_before);
        assert_eq!(target, target_before);
    }

    #[test]
    fn locked_skill_is_rejected() {
        let skill = SkillDef::new("overclock", 3, SkillEffectKind::DebuffAttack, 3);
        let mut caster = caster_with("shrapnel_blast", 10);
        let mut target = golem();
        let err = cast(&mut caster, Some(&mut target), &skill, &GameConfig::default()).unwrap_err();
        assert_eq!(err, CombatError::NotUnlocked("overclock".into()));
    }

    #[test]
    fn defeated_target_is_invalid() {
        let skill = SkillDef::new("shrapnel_blast", 2, SkillEffectKind::Damage, 6);
        let mut caster = caster_with("shrapnel_blast", 10);
        let mut target = golem();
        target.hp.damage(100);
        let err = cast(&mut caster, Some(&mut target), &skill, &GameConfig::default()).unwrap_err();
        assert_eq!(err, CombatError::InvalidTarget(EntityId::enemy(0)));
        assert_eq!(caster.sp.current(), 10);
    }

    #[test]
    fn drain_heals_caster_by_damage_dealt() {
        let skill = SkillDef::new("scrap_leech", 3, SkillEffectKind::Drain, 5);
        let mut caster = caster_with("scrap_leech", 10);
        caster.hp.damage(20);
        let mut target = golem();

        let outcome = cast(&mut caster, Some(&mut target), &skill, &GameConfig::default()).unwrap();

        assert_eq!(outcome.applied, 5);
        assert_eq!(target.hp.current(), 20);
        assert_eq!(caster.hp.current(), 15);
        assert_eq!(caster.sp.current(), 7);
    }

    #[test]
    fn strength_scaled_damage() {
        let skill = SkillDef::new("voltage_surge", 4, SkillEffectKind::Damage, 10)
            .with_scaling(ScalingStat::Strength, 0.25);
        let mut caster = caster_with("voltage_surge", 10);
        let mut target = golem();
        let outcome = cast(&mut caster, Some(&mut target), &skill, &GameConfig::default()).unwrap();
        // floor(10 + 0.25 * 5)
        assert_eq!(outcome.value, 11);
        assert_eq!(target.hp.current(), 14);
    }

    #[test]
    fn debuff_both_replaces_previous_debuff() {
        let config = GameConfig::default();
        let overclock = SkillDef::new("overclock", 3, SkillEffectKind::DebuffAttack, 3);
        let emp = SkillDef::new("emp_pulse", 5, SkillEffectKind::DebuffBoth, 2);
        let mut caster = caster_with("overclock", 10);
        caster.skills.grant("emp_pulse");
        let mut target = golem();

        cast(&mut caster, Some(&mut target), &overclock, &config).unwrap();
        assert_eq!(target.effective_attack(), 4);

        let outcome = cast(&mut caster, Some(&mut target), &emp, &config).unwrap();
        assert_eq!(outcome.turns, 3);
        assert_eq!(target.effective_attack(), 5);
        assert_eq!(target.effective_defense(), 2);
    }

    #[test]
    fn buff_and_cure_target_the_caster() {
        let config = GameConfig::default();
        let shield = SkillDef::new("jury_rig_shield", 3, SkillEffectKind::BuffDefense, 4);
        let purge = SkillDef::new("system_purge", 3, SkillEffectKind::CureStatus, 0);
        let mut caster = caster_with("jury_rig_shield", 10);
        caster.skills.grant("system_purge");
        caster.status.apply(StatusKind::Poison, 3);

        cast(&mut caster, None, &shield, &config).unwrap();
        assert_eq!(caster.effective_defense(), 3 + 4);

        let outcome = cast(&mut caster, None, &purge, &config).unwrap();
        assert_eq!(outcome.cured, vec![StatusKind::Poison]);
        assert!(caster.status.is_empty());
    }
}
