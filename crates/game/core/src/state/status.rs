//! Status effects carried by a combatant.
//!
//! At most one instance per kind exists at a time. Reapplying a kind refreshes
//! its remaining turns to the larger of the old and new values; magnitude is
//! fixed per kind and never stacks.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Kinds of status effect.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// 2 damage per turn.
    Poison,
    /// Action for the turn is replaced by a skip.
    Stun,
    /// 1 damage per turn and attack reduced by 2 while active.
    Burn,
    /// Dexterity reduced by 4 for hit-chance purposes only.
    Despondent,
}

impl StatusKind {
    pub const fn default_duration(self) -> u32 {
        match self {
            StatusKind::Stun => 1,
            StatusKind::Poison | StatusKind::Burn | StatusKind::Despondent => 3,
        }
    }

    /// Damage dealt at each tick.
    pub const fn tick_damage(self) -> u32 {
        match self {
            StatusKind::Poison => 2,
            StatusKind::Burn => 1,
            StatusKind::Stun | StatusKind::Despondent => 0,
        }
    }

    /// Reduction to effective attack while active.
    pub const fn attack_penalty(self) -> i32 {
        match self {
            StatusKind::Burn => 2,
            _ => 0,
        }
    }

    /// Reduction to dexterity in the hit formula while active.
    pub const fn dexterity_penalty(self) -> i32 {
        match self {
            StatusKind::Despondent => 4,
            _ => 0,
        }
    }
}

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Turns left, always > 0 while stored.
    pub remaining: u32,
    /// Applied or restarted during the current turn. Fresh effects neither
    /// deal damage nor count down at that turn's tick, so a 1-turn Stun still
    /// costs the target its next action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fresh: bool,
}

impl StatusEffect {
    /// Whether this effect takes part in the coming tick.
    pub const fn is_ticking(&self) -> bool {
        !self.fresh
    }
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Remaining turns of `kind`, if active.
    pub fn remaining(&self, kind: StatusKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining)
    }

    /// Adds or refreshes an effect and returns its resulting remaining turns.
    ///
    /// A refresh that is at least as long as what is left restarts the effect:
    /// it becomes fresh again and skips this turn's tick. A shorter one leaves
    /// the effect as it is. A zero duration is ignored.
    pub fn apply(&mut self, kind: StatusKind, turns: u32) -> u32 {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            if turns > 0 && turns >= existing.remaining {
                existing.remaining = turns;
                existing.fresh = true;
            }
            return existing.remaining;
        }
        if turns == 0 {
            return 0;
        }
        // One slot per kind, so the array never fills up.
        let _ = self.effects.try_push(StatusEffect {
            kind,
            remaining: turns,
            fresh: true,
        });
        turns
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Removes every effect, returning the kinds that were active.
    pub fn clear(&mut self) -> Vec<StatusKind> {
        self.effects.drain(..).map(|e| e.kind).collect()
    }

    /// Decrements every ticking effect by one turn and returns those that
    /// reached 0. Fresh effects only lose their fresh mark.
    pub fn decrement(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.fresh {
                e.fresh = false;
                return true;
            }
            e.remaining -= 1;
            if e.remaining == 0 {
                expired.push(e.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn attack_penalty(&self) -> i32 {
        self.effects.iter().map(|e| e.kind.attack_penalty()).sum()
    }

    pub fn dexterity_penalty(&self) -> i32 {
        self.effects.iter().map(|e| e.kind.dexterity_penalty()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplication_keeps_the_longer_duration() {
        let mut effects = StatusEffects::empty();
        assert_eq!(effects.apply(StatusKind::Poison, 2), 2);
        assert_eq!(effects.apply(StatusKind::Poison, 3), 3);
        assert_eq!(effects.apply(StatusKind::Poison, 1), 3);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn decrement_expires_effects_at_zero() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::Stun, 1);
        effects.apply(StatusKind::Burn, 3);

        assert!(effects.decrement().is_empty());
        assert_eq!(effects.remaining(StatusKind::Stun), Some(1));
        assert_eq!(effects.decrement(), vec![StatusKind::Stun]);
        assert!(!effects.has(StatusKind::Stun));
        assert_eq!(effects.remaining(StatusKind::Burn), Some(2));
    }

    #[test]
    fn refresh_restarts_an_effect_about_to_expire() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::Stun, 1);
        assert!(effects.decrement().is_empty());

        // Last turn of the stun: reapplying it survives the coming tick.
        assert_eq!(effects.apply(StatusKind::Stun, 1), 1);
        assert!(effects.decrement().is_empty());
        assert!(effects.has(StatusKind::Stun));
        assert_eq!(effects.decrement(), vec![StatusKind::Stun]);
    }

    #[test]
    fn shorter_refresh_keeps_the_countdown_running() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusKind::Poison, 3);
        effects.decrement();
        effects.decrement();
        assert_eq!(effects.remaining(StatusKind::Poison), Some(2));

        assert_eq!(effects.apply(StatusKind::Poison, 1), 2);
        let poison = effects.iter().next().copied().unwrap();
        assert!(poison.is_ticking());
        effects.decrement();
        assert_eq!(effects.remaining(StatusKind::Poison), Some(1));
    }

    #[test]
    fn all_kinds_fit_at_once() {
        let mut effects = StatusEffects::empty();
        for kind in [
            StatusKind::Poison,
            StatusKind::Stun,
            StatusKind::Burn,
            StatusKind::Despondent,
        ] {
            effects.apply(kind, kind.default_duration());
        }
        assert_eq!(effects.len(), 4);
        assert_eq!(effects.attack_penalty(), 2);
        assert_eq!(effects.dexterity_penalty(), 4);
    }
}
