//! XP awards and level-ups.

use crate::config::GameConfig;
use crate::state::PlayerProfile;

/// Bonuses granted by reaching one new level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    /// The level just reached.
    pub level: u32,
    pub max_hp_gain: i32,
    pub stat_points: u32,
    pub skill_points: u32,
}

impl LevelUp {
    fn reached(level: u32, max_hp: i32) -> Self {
        let max_hp_gain = ((f64::from(max_hp) * 0.02).round() as i32).max(1);
        let stat_points = if level % 10 == 0 { 4 } else { 2 };
        let skill_points = if level % 5 == 0 { 2 } else { 1 };
        Self {
            level,
            max_hp_gain,
            stat_points,
            skill_points,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionReport {
    pub xp_gained: u32,
    pub money_gained: u32,
    /// One entry per level gained, in order.
    pub level_ups: Vec<LevelUp>,
}

impl ProgressionReport {
    pub fn leveled_up(&self) -> bool {
        !self.level_ups.is_empty()
    }

    pub fn final_level(&self) -> Option<u32> {
        self.level_ups.last().map(|up| up.level)
    }
}

/// Adds `xp` and `money` to `profile` and applies every level-up they unlock.
///
/// Levels compound: each Max HP gain is computed from the Max HP left by the
/// previous level-up. HP and SP are refilled on every level-up.
pub fn award(
    profile: &mut PlayerProfile,
    xp: u32,
    money: u32,
    config: &GameConfig,
) -> ProgressionReport {
    profile.money = profile.money.saturating_add(money);
    profile.xp = profile.xp.saturating_add(xp);

    let mut report = ProgressionReport {
        xp_gained: xp,
        money_gained: money,
        level_ups: Vec::new(),
    };

    // A zero threshold would loop forever.
    while config.xp_per_level > 0 && profile.xp >= config.xp_threshold(profile.level) {
        profile.level += 1;
        let up = LevelUp::reached(profile.level, profile.base.max_hp);

        profile.base.max_hp += up.max_hp_gain;
        profile.stat_points += up.stat_points;
        profile.skills.grant_points(up.skill_points);
        profile.hp = profile.max_hp();
        profile.sp = profile.max_sp();

        report.level_ups.push(up);
    }

    report
}
