//! Death and respawn.

use crate::state::PlayerProfile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathPenalty {
    pub money_lost: u32,
}

/// Halves the player's money (floor), respawns with half Max HP (at least 1)
/// and full SP.
pub fn apply_death_penalty(profile: &mut PlayerProfile) -> DeathPenalty {
    let money_lost = profile.money - profile.money / 2;
    profile.money /= 2;
    profile.hp = (profile.max_hp() / 2).max(1);
    profile.sp = profile.max_sp();
    DeathPenalty { money_lost }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_money_and_respawns_at_half_hp() {
        let mut profile = PlayerProfile::new("Ada");
        profile.money = 25;
        profile.hp = 0;
        profile.sp = 1;

        let penalty = apply_death_penalty(&mut profile);

        assert_eq!(penalty.money_lost, 13);
        assert_eq!(profile.money, 12);
        assert_eq!(profile.hp, 15);
        assert_eq!(profile.sp, 10);
    }

    #[test]
    fn respawn_hp_is_at_least_one() {
        let mut profile = PlayerProfile::new("Ada");
        profile.base.max_hp = 1;
        profile.hp = 0;
        apply_death_penalty(&mut profile);
        assert_eq!(profile.hp, 1);
    }
}
