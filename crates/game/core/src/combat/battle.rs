//! State of one battle.
//!
//! A [`BattleState`] owns value copies of every participant. It is created by
//! [`CombatEngine::start`](super::CombatEngine::start), advanced by
//! [`CombatEngine::resolve_turn`](super::CombatEngine::resolve_turn), and
//! dropped by the runtime once a terminal phase has been flushed.

use std::collections::BTreeSet;

use crate::state::{Combatant, CombatantKind, EnemyTypeId, EntityId};

use super::{BattleEvent, QueuedAction};

/// Which side of the battle a combatant fights on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Players,
    Enemies,
}

/// Battle state machine.
///
/// `AwaitingAction -> ResolvingTurn -> (AwaitingAction | Victory | Defeat | Fled)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    #[default]
    AwaitingAction,
    ResolvingTurn,
    Victory,
    Defeat,
    Fled,
}

impl BattlePhase {
    pub const fn is_terminal(self) -> bool {
        self.outcome().is_some()
    }

    pub const fn outcome(self) -> Option<BattleOutcome> {
        match self {
            Self::Victory => Some(BattleOutcome::Victory),
            Self::Defeat => Some(BattleOutcome::Defeat),
            Self::Fled => Some(BattleOutcome::Fled),
            Self::AwaitingAction | Self::ResolvingTurn => None,
        }
    }
}

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

/// XP and money earned by a victory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRewards {
    pub xp: u32,
    pub money: u32,
    /// Template ids of every defeated enemy instance, in encounter order.
    pub defeated: Vec<EnemyTypeId>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub(crate) players: Vec<Combatant>,
    pub(crate) enemies: Vec<Combatant>,
    pub(crate) turn: u32,
    pub(crate) queue: Vec<QueuedAction>,
    pub(crate) phase: BattlePhase,
    /// Combatants whose defend has not been consumed yet this turn.
    pub(crate) defending: BTreeSet<EntityId>,
    pub(crate) log: Vec<BattleEvent>,
}

impl BattleState {
    pub(crate) fn new(players: Vec<Combatant>, enemies: Vec<Combatant>) -> Self {
        Self {
            players,
            enemies,
            turn: 0,
            queue: Vec::new(),
            phase: BattlePhase::AwaitingAction,
            defending: BTreeSet::new(),
            log: Vec::new(),
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Number of fully resolved turns.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn players(&self) -> &[Combatant] {
        &self.players
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn side(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Players => &self.players,
            Side::Enemies => &self.enemies,
        }
    }

    pub fn queued(&self) -> &[QueuedAction] {
        &self.queue
    }

    pub fn is_defending(&self, id: EntityId) -> bool {
        self.defending.contains(&id)
    }

    /// Every event since the battle started.
    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.players
            .iter()
            .chain(self.enemies.iter())
            .find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.players
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|c| c.id == id)
    }

    pub fn side_of(&self, id: EntityId) -> Option<Side> {
        if self.players.iter().any(|c| c.id == id) {
            Some(Side::Players)
        } else if self.enemies.iter().any(|c| c.id == id) {
            Some(Side::Enemies)
        } else {
            None
        }
    }

    pub fn is_wiped(&self, side: Side) -> bool {
        self.side(side).iter().all(Combatant::is_defeated)
    }

    pub(crate) fn player_index(&self, id: EntityId) -> Option<usize> {
        self.players.iter().position(|c| c.id == id)
    }

    pub(crate) fn first_living_player(&self) -> Option<usize> {
        self.players.iter().position(Combatant::is_alive)
    }

    /// Index of the enemy to hit: the requested one if still standing,
    /// otherwise the first living enemy.
    pub(crate) fn enemy_target(&self, requested: Option<EntityId>) -> Option<usize> {
        requested
            .and_then(|id| {
                self.enemies
                    .iter()
                    .position(|c| c.id == id && c.is_alive())
            })
            .or_else(|| self.enemies.iter().position(Combatant::is_alive))
    }

    /// Sum of XP and money over all enemy instances, once the battle is won.
    pub fn rewards(&self) -> Option<BattleRewards> {
        if self.phase != BattlePhase::Victory {
            return None;
        }
        let mut rewards = BattleRewards::default();
        for enemy in &self.enemies {
            rewards.xp = rewards.xp.saturating_add(enemy.xp_reward);
            rewards.money = rewards.money.saturating_add(enemy.money_reward);
            if let CombatantKind::Enemy { type_id } = &enemy.kind {
                rewards.defeated.push(type_id.clone());
            }
        }
        Some(rewards)
    }
}
