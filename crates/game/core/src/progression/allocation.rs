//! Spending unspent stat points.

use crate::error::CombatError;
use crate::state::PlayerProfile;
use crate::stats::StatKind;

/// Spends one stat point on `stat` and returns the new base value.
///
/// Max HP grows by 3, Max SP by 2, every other stat by 1. Raising a maximum
/// also raises the current value by the same step.
///
/// # Errors
///
/// [`CombatError::InsufficientPoints`] when no point is left to spend.
pub fn allocate_stat(profile: &mut PlayerProfile, stat: StatKind) -> Result<i32, CombatError> {
    if profile.stat_points == 0 {
        return Err(CombatError::InsufficientPoints {
            needed: 1,
            available: 0,
        });
    }

    let step = stat.allocation_step();
    profile.stat_points -= 1;
    let value = profile.base.get_mut(stat);
    *value += step;
    let value = *value;

    match stat {
        StatKind::MaxHp => profile.hp = profile.hp.saturating_add(step as u32),
        StatKind::MaxSp => profile.sp = profile.sp.saturating_add(step as u32),
        _ => {}
    }
    profile.clamp_resources();

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_per_stat() {
        let mut profile = PlayerProfile::new("Ada");
        profile.stat_points = 3;

        assert_eq!(allocate_stat(&mut profile, StatKind::MaxHp), Ok(33));
        assert_eq!(profile.hp, 33);
        assert_eq!(allocate_stat(&mut profile, StatKind::MaxSp), Ok(12));
        assert_eq!(profile.sp, 12);
        assert_eq!(allocate_stat(&mut profile, StatKind::Dexterity), Ok(6));
        assert_eq!(profile.stat_points, 0);
    }

    #[test]
    fn no_points_left() {
        let mut profile = PlayerProfile::new("Ada");
        let before = profile.clone();
        assert_eq!(
            allocate_stat(&mut profile, StatKind::Strength),
            Err(CombatError::InsufficientPoints {
                needed: 1,
                available: 0
            })
        );
        assert_eq!(profile, before);
    }
}
