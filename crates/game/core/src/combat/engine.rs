//! Combat resolution engine.
//!
//! The engine itself is stateless: it borrows the read-only [`Env`] and
//! operates on a caller-owned [`BattleState`]. Randomness and the inventory
//! are passed to each call because they are the only mutable collaborators.
//!
//! # Turn order
//!
//! 1. Queued player actions, in queue order (stunned actors skip)
//! 2. Every living enemy attacks the first living player (stunned enemies skip)
//! 3. End-of-turn tick for every living combatant
//! 4. Terminal check, defeat before victory
//!
//! Resolution stops early once a side is wiped out. A successful flee ends
//! the battle immediately.

use crate::config::GameConfig;
use crate::env::{ConsumableEffect, Env, Inventory, RngOracle, SkillDef};
use crate::error::CombatError;
use crate::skill::{cast, validate_cast};
use crate::state::{Combatant, EnemyTypeId, EntityId, ItemId, SkillId, StatusKind};
use crate::stats::StatKind;

use super::damage::defended_damage;
use super::status::{apply_status, cure, tick};
use super::{
    BattleAction, BattleEvent, BattlePhase, BattleState, QueuedAction, Side, TurnReport,
    resolve_attack,
};

#[derive(Clone, Copy, Debug)]
pub struct CombatEngine<'a> {
    env: Env<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(env: Env<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Env<'a> {
        &self.env
    }

    fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    /// Starts a battle between `players` and fresh instances of `encounter`.
    ///
    /// # Errors
    ///
    /// - [`CombatError::EmptySide`] when either side has no living combatant
    /// - [`CombatError::UnknownEnemyType`] when an id is missing from the registry
    pub fn start(
        &self,
        players: Vec<Combatant>,
        encounter: &[EnemyTypeId],
    ) -> Result<BattleState, CombatError> {
        if players.iter().all(Combatant::is_defeated) {
            return Err(CombatError::EmptySide(Side::Players));
        }
        if encounter.is_empty() {
            return Err(CombatError::EmptySide(Side::Enemies));
        }

        let enemies = encounter
            .iter()
            .enumerate()
            .map(|(index, type_id)| {
                self.env
                    .enemies()
                    .enemy(type_id)
                    .map(|def| Combatant::from_enemy(EntityId::enemy(index), def))
                    .ok_or_else(|| CombatError::UnknownEnemyType(type_id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BattleState::new(players, enemies))
    }

    /// Queues `actor`'s action for the current turn after validating it.
    ///
    /// Stun is not a validation failure: a stunned actor may queue, and the
    /// action is discarded when the turn resolves.
    ///
    /// # Errors
    ///
    /// - [`CombatError::BattleOver`] once the battle is terminal
    /// - [`CombatError::ActorNotFound`] when `actor` is not on the player side
    /// - [`CombatError::ActorDefeated`] when `actor` has no HP left
    /// - [`CombatError::ActionAlreadyQueued`] for a second action in one turn
    /// - skill and item failures from [`validate_cast`] and inventory checks
    pub fn queue_action(
        &self,
        battle: &mut BattleState,
        actor: EntityId,
        action: BattleAction,
        inventory: &dyn Inventory,
    ) -> Result<(), CombatError> {
        if battle.is_over() {
            return Err(CombatError::BattleOver);
        }
        let index = battle
            .player_index(actor)
            .ok_or(CombatError::ActorNotFound(actor))?;
        if battle.players[index].is_defeated() {
            return Err(CombatError::ActorDefeated(actor));
        }
        if battle.queue.iter().any(|queued| queued.actor == actor) {
            return Err(CombatError::ActionAlreadyQueued(actor));
        }

        self.validate(battle, &battle.players[index], &action, inventory)?;
        battle.queue.push(QueuedAction { actor, action });
        Ok(())
    }

    fn validate(
        &self,
        battle: &BattleState,
        actor: &Combatant,
        action: &BattleAction,
        inventory: &dyn Inventory,
    ) -> Result<(), CombatError> {
        match action {
            BattleAction::Attack { target } => {
                Self::requested_enemy(battle, Some(*target)).map(|_| ())
            }
            BattleAction::Defend | BattleAction::Flee => Ok(()),
            BattleAction::Skill { skill, target } => {
                let def = self.skill_def(skill)?;
                let target = if def.effect.targets_enemy() {
                    Self::requested_enemy(battle, *target)?
                } else {
                    None
                };
                validate_cast(actor, target, def)
            }
            BattleAction::Item { item, target } => {
                let effect = self.consumable(item)?;
                if inventory.count(item) == 0 {
                    return Err(CombatError::ItemUnavailable(item.clone()));
                }
                if effect.targets_enemy() {
                    Self::requested_enemy(battle, *target)?;
                }
                Ok(())
            }
        }
    }

    /// Named target must be a living enemy; no target means the first living one.
    fn requested_enemy(
        battle: &BattleState,
        target: Option<EntityId>,
    ) -> Result<Option<&Combatant>, CombatError> {
        match target {
            Some(id) => battle
                .enemies
                .iter()
                .find(|enemy| enemy.id == id && enemy.is_alive())
                .map(Some)
                .ok_or(CombatError::InvalidTarget(id)),
            None => Ok(battle.enemy_target(None).map(|index| &battle.enemies[index])),
        }
    }

    fn skill_def(&self, id: &SkillId) -> Result<&'a SkillDef, CombatError> {
        self.env
            .skills()
            .skill(id)
            .ok_or_else(|| CombatError::UnknownSkill(id.clone()))
    }

    fn consumable(&self, id: &ItemId) -> Result<ConsumableEffect, CombatError> {
        self.env
            .items()
            .item(id)
            .and_then(|def| def.consumable_effect())
            .ok_or_else(|| CombatError::ItemUnavailable(id.clone()))
    }

    /// Resolves the current turn and returns its events.
    ///
    /// Players without a queued action simply idle this turn.
    ///
    /// # Errors
    ///
    /// [`CombatError::BattleOver`] once the battle is terminal.
    pub fn resolve_turn(
        &self,
        battle: &mut BattleState,
        rng: &mut dyn RngOracle,
        inventory: &mut dyn Inventory,
    ) -> Result<TurnReport, CombatError> {
        if battle.is_over() {
            return Err(CombatError::BattleOver);
        }
        battle.phase = BattlePhase::ResolvingTurn;
        battle.turn += 1;

        let mut events = vec![BattleEvent::TurnStarted { turn: battle.turn }];
        let queue = std::mem::take(&mut battle.queue);

        if self.player_phase(battle, queue, rng, inventory, &mut events) {
            battle.defending.clear();
            return Ok(Self::finish(battle, BattlePhase::Fled, events));
        }

        if !battle.is_wiped(Side::Enemies) {
            self.enemy_phase(battle, rng, &mut events);
        }
        battle.defending.clear();

        if !battle.is_wiped(Side::Players) && !battle.is_wiped(Side::Enemies) {
            Self::tick_phase(battle, &mut events);
        }

        let phase = if battle.is_wiped(Side::Players) {
            BattlePhase::Defeat
        } else if battle.is_wiped(Side::Enemies) {
            BattlePhase::Victory
        } else {
            BattlePhase::AwaitingAction
        };
        Ok(Self::finish(battle, phase, events))
    }

    fn finish(battle: &mut BattleState, phase: BattlePhase, mut events: Vec<BattleEvent>) -> TurnReport {
        battle.phase = phase;
        if let Some(outcome) = phase.outcome() {
            events.push(BattleEvent::BattleEnded { outcome });
        }
        battle.log.extend(events.iter().cloned());
        TurnReport {
            turn: battle.turn,
            events,
            phase,
        }
    }

    /// Returns true when a flee attempt succeeded.
    fn player_phase(
        &self,
        battle: &mut BattleState,
        queue: Vec<QueuedAction>,
        rng: &mut dyn RngOracle,
        inventory: &mut dyn Inventory,
        events: &mut Vec<BattleEvent>,
    ) -> bool {
        for QueuedAction { actor, action } in queue {
            if battle.is_wiped(Side::Enemies) {
                break;
            }
            let Some(index) = battle.player_index(actor) else {
                continue;
            };
            if battle.players[index].is_defeated() {
                continue;
            }
            if battle.players[index].status.has(StatusKind::Stun) {
                events.push(BattleEvent::ActionSkipped { actor });
                continue;
            }

            match action {
                BattleAction::Attack { target } => {
                    self.player_attack(battle, index, target, rng, events);
                }
                BattleAction::Defend => {
                    battle.defending.insert(actor);
                    events.push(BattleEvent::Defending { actor });
                }
                BattleAction::Skill { skill, target } => {
                    self.player_skill(battle, index, &skill, target, events);
                }
                BattleAction::Item { item, target } => {
                    self.player_item(battle, index, item, target, inventory, events);
                }
                BattleAction::Flee => {
                    let success = rng.roll(self.config().flee_chance);
                    events.push(BattleEvent::FleeAttempted { actor, success });
                    if success {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn player_attack(
        &self,
        battle: &mut BattleState,
        index: usize,
        requested: EntityId,
        rng: &mut dyn RngOracle,
        events: &mut Vec<BattleEvent>,
    ) {
        let Some(target) = battle.enemy_target(Some(requested)) else {
            return;
        };
        let result = resolve_attack(
            &battle.players[index],
            &battle.enemies[target],
            rng,
            &self.config().hit_chance,
        );
        let enemy = &mut battle.enemies[target];
        let damage = enemy.hp.damage(result.damage);
        events.push(BattleEvent::Attacked {
            actor: battle.players[index].id,
            target: enemy.id,
            result,
            damage,
            defended: false,
        });
        if enemy.is_defeated() {
            events.push(BattleEvent::Defeated { target: enemy.id });
        }
    }

    fn player_skill(
        &self,
        battle: &mut BattleState,
        index: usize,
        skill: &SkillId,
        requested: Option<EntityId>,
        events: &mut Vec<BattleEvent>,
    ) {
        let actor = battle.players[index].id;
        let def = match self.skill_def(skill) {
            Ok(def) => def,
            Err(error) => {
                events.push(BattleEvent::ActionFailed { actor, error });
                return;
            }
        };
        let target = if def.effect.targets_enemy() {
            battle.enemy_target(requested)
        } else {
            None
        };

        let caster = &mut battle.players[index];
        let enemy = target.map(|j| &mut battle.enemies[j]);
        match cast(caster, enemy, def, self.config()) {
            Ok(outcome) => {
                let target_id = target.map(|j| battle.enemies[j].id);
                events.push(BattleEvent::SkillCast {
                    actor,
                    target: target_id,
                    outcome,
                });
                if let Some(j) = target {
                    if battle.enemies[j].is_defeated() {
                        events.push(BattleEvent::Defeated {
                            target: battle.enemies[j].id,
                        });
                    }
                }
            }
            Err(error) => events.push(BattleEvent::ActionFailed { actor, error }),
        }
    }

    fn player_item(
        &self,
        battle: &mut BattleState,
        index: usize,
        item: ItemId,
        requested: Option<EntityId>,
        inventory: &mut dyn Inventory,
        events: &mut Vec<BattleEvent>,
    ) {
        let actor = battle.players[index].id;
        let effect = match self.consumable(&item) {
            Ok(effect) => effect,
            Err(error) => {
                events.push(BattleEvent::ActionFailed { actor, error });
                return;
            }
        };
        let enemy_index = if effect.targets_enemy() {
            battle.enemy_target(requested)
        } else {
            None
        };
        if !inventory.take_consumable(&item) {
            events.push(BattleEvent::ActionFailed {
                actor,
                error: CombatError::ItemUnavailable(item),
            });
            return;
        }

        let user = &mut battle.players[index];
        let mut target = None;
        let amount = match effect {
            ConsumableEffect::Heal(amount) => user.hp.heal(amount),
            ConsumableEffect::RestoreSp(amount) => user.sp.heal(amount),
            ConsumableEffect::CureStatus => cure(user).len() as u32,
            ConsumableEffect::BuffDefense(amount) => {
                user.modifiers.add_battle(StatKind::Resilience, amount);
                amount.max(0) as u32
            }
            ConsumableEffect::Damage(amount) => match enemy_index {
                Some(j) => {
                    let enemy = &mut battle.enemies[j];
                    target = Some(enemy.id);
                    enemy.hp.damage(amount)
                }
                None => 0,
            },
        };

        events.push(BattleEvent::ItemUsed {
            actor,
            target,
            item,
            effect,
            amount,
        });
        if let Some(j) = enemy_index {
            if battle.enemies[j].is_defeated() {
                events.push(BattleEvent::Defeated {
                    target: battle.enemies[j].id,
                });
            }
        }
    }

    fn enemy_phase(
        &self,
        battle: &mut BattleState,
        rng: &mut dyn RngOracle,
        events: &mut Vec<BattleEvent>,
    ) {
        let config = self.config();
        for e in 0..battle.enemies.len() {
            if battle.enemies[e].is_defeated() {
                continue;
            }
            let Some(p) = battle.first_living_player() else {
                break;
            };
            let actor = battle.enemies[e].id;
            if battle.enemies[e].status.has(StatusKind::Stun) {
                events.push(BattleEvent::ActionSkipped { actor });
                continue;
            }

            let result = resolve_attack(
                &battle.enemies[e],
                &battle.players[p],
                rng,
                &config.hit_chance,
            );
            let player = &mut battle.players[p];
            // Defend is consumed by the first incoming attack, hit or miss.
            let defended = battle.defending.remove(&player.id);
            let incoming = if defended && result.landed() {
                defended_damage(result.damage, config.defend_divisor)
            } else {
                result.damage
            };

            if let Some(kind) = result.inflicts {
                let turns = apply_status(player, kind, kind.default_duration());
                events.push(BattleEvent::StatusApplied {
                    target: player.id,
                    kind,
                    turns,
                });
            }
            let damage = player.hp.damage(incoming);
            events.push(BattleEvent::Attacked {
                actor,
                target: player.id,
                result,
                damage,
                defended,
            });
            if player.is_defeated() {
                events.push(BattleEvent::Defeated { target: player.id });
            }
        }
    }

    fn tick_phase(battle: &mut BattleState, events: &mut Vec<BattleEvent>) {
        for combatant in battle.players.iter_mut().chain(battle.enemies.iter_mut()) {
            if combatant.is_defeated() {
                continue;
            }
            let target = combatant.id;
            let report = tick(combatant);
            for (kind, damage) in report.damage {
                events.push(BattleEvent::StatusDamage {
                    target,
                    kind,
                    damage,
                });
            }
            for kind in report.expired {
                events.push(BattleEvent::StatusExpired { target, kind });
            }
            for modifier in report.modifiers_expired {
                events.push(BattleEvent::ModifierExpired {
                    target,
                    stat: modifier.stat,
                });
            }
            if report.sp_regenerated > 0 {
                events.push(BattleEvent::SpRegenerated {
                    target,
                    amount: report.sp_regenerated,
                });
            }
            if combatant.is_defeated() {
                events.push(BattleEvent::Defeated { target });
            }
        }
    }
}
