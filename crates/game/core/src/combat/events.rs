//! Structured battle log.
//!
//! The rules engine performs no I/O. Instead every roll outcome and state
//! change is recorded as a [`BattleEvent`] for the presentation layer and for
//! the runtime's tracing output.

use crate::env::ConsumableEffect;
use crate::error::CombatError;
use crate::skill::CastOutcome;
use crate::state::{EntityId, ItemId, StatusKind};
use crate::stats::StatKind;

use super::{AttackResult, BattleOutcome, BattlePhase};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    TurnStarted {
        turn: u32,
    },
    /// Stun replaced the combatant's action with a skip.
    ActionSkipped {
        actor: EntityId,
    },
    /// A queued action could no longer be carried out when it resolved.
    ActionFailed {
        actor: EntityId,
        error: CombatError,
    },
    Attacked {
        actor: EntityId,
        target: EntityId,
        result: AttackResult,
        /// Damage actually taken, after defend and HP clamping.
        damage: u32,
        defended: bool,
    },
    Defending {
        actor: EntityId,
    },
    SkillCast {
        actor: EntityId,
        target: Option<EntityId>,
        outcome: CastOutcome,
    },
    ItemUsed {
        actor: EntityId,
        target: Option<EntityId>,
        item: ItemId,
        effect: ConsumableEffect,
        amount: u32,
    },
    FleeAttempted {
        actor: EntityId,
        success: bool,
    },
    StatusApplied {
        target: EntityId,
        kind: StatusKind,
        turns: u32,
    },
    StatusDamage {
        target: EntityId,
        kind: StatusKind,
        damage: u32,
    },
    StatusExpired {
        target: EntityId,
        kind: StatusKind,
    },
    ModifierExpired {
        target: EntityId,
        stat: StatKind,
    },
    SpRegenerated {
        target: EntityId,
        amount: u32,
    },
    Defeated {
        target: EntityId,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

/// Result of one [`CombatEngine::resolve_turn`](super::CombatEngine::resolve_turn) call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    pub events: Vec<BattleEvent>,
    /// Phase after the turn: `AwaitingAction` or a terminal phase.
    pub phase: BattlePhase,
}

impl TurnReport {
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }
}
