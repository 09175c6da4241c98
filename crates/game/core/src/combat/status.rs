//! Status effect engine: application with Constitution reduction and the
//! end-of-turn tick.
//!
//! Per-turn order: (1) stun check, (2) action, (3) [`tick`] for every living
//! combatant, (4) terminal check.

use crate::state::{Combatant, StatusKind};
use crate::stats::{StatKind, StatModifier, debuff_duration, sp_regen};

/// Applies `kind` to `target` for `base_turns`, shortened by the target's
/// Constitution (never below 1). Returns the resulting remaining turns.
pub fn apply_status(target: &mut Combatant, kind: StatusKind, base_turns: u32) -> u32 {
    let turns = debuff_duration(base_turns, target.effective(StatKind::Constitution));
    target.status.apply(kind, turns)
}

/// Clears every status effect, returning what was removed.
pub fn cure(target: &mut Combatant) -> Vec<StatusKind> {
    target.status.clear()
}

/// Everything one end-of-turn tick did to a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Periodic damage per status kind, as actually applied.
    pub damage: Vec<(StatusKind, u32)>,
    pub expired: Vec<StatusKind>,
    pub modifiers_expired: Vec<StatModifier>,
    pub sp_regenerated: u32,
}

/// Runs one tick: periodic damage, status countdown, temporary modifier
/// countdown and SP regeneration.
pub fn tick(target: &mut Combatant) -> TickReport {
    let mut report = TickReport::default();

    let periodic: Vec<(StatusKind, u32)> = target
        .status
        .iter()
        .filter(|effect| effect.is_ticking())
        .map(|effect| (effect.kind, effect.kind.tick_damage()))
        .filter(|(_, damage)| *damage > 0)
        .collect();
    for (kind, damage) in periodic {
        let dealt = target.hp.damage(damage);
        report.damage.push((kind, dealt));
    }

    report.expired = target.status.decrement();
    report.modifiers_expired = target.modifiers.tick();

    if target.is_alive() {
        let regen = sp_regen(target.effective(StatKind::Intelligence));
        report.sp_regenerated = target.sp.heal(regen);
    }

    report
}
