//! Battle session lifecycle.
//!
//! A [`Session`] owns the loaded [`PlayerProfile`] and at most one battle. It
//! is the only place where battle results reach persistent state:
//!
//! 1. `start_*` copies the profile into a fresh [`BattleState`]
//! 2. [`Session::act`] queues the player's action, [`Session::resolve_turn`] runs it
//! 3. on a terminal phase the player's HP/SP are flushed back, rewards or the
//!    death penalty are applied, and the profile is saved
//!
//! Fleeing applies nothing but the flush. Victories also count defeated enemies
//! toward active kill quests.
//!
//! A failed save after a battle does not lose the result: the conclusion is
//! still returned with `saved == false` and the session keeps the changes until
//! [`Session::save`] succeeds.

use game_content::Content;
use game_core::skill::unlock;
use game_core::{
    BattleAction, BattleOutcome, BattleRewards, BattleState, Combatant, CombatEngine,
    CombatError, DeathPenalty, EnemyTypeId, EntityId, EquipSlot, GameError, Inventory, ItemId,
    ItemKind, LevelUp, PlayerProfile, ProgressionReport, QuestClaim, QuestId, QuestState,
    RngOracle, SkillId, StatKind, TurnReport, allocate_stat, apply_death_penalty, award,
    claim_rewards, quest,
};
use tracing::{debug, error, info, warn};

use crate::encounter::{EncounterTable, ScriptedEncounter, roll_bonus_drop};
use crate::error::{Result, RuntimeError};
use crate::repository::ProfileRepository;

/// What ending a battle did to the profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleConclusion {
    pub outcome: BattleOutcome,
    pub rewards: Option<BattleRewards>,
    pub progression: Option<ProgressionReport>,
    pub penalty: Option<DeathPenalty>,
    /// Scripted encounter newly marked as cleared.
    pub cleared: Option<String>,
    /// Quests whose objectives this battle completed.
    pub quests_completed: Vec<QuestId>,
    /// False when writing the profile failed; the session still holds the
    /// result and reports unsaved changes.
    pub saved: bool,
}

/// Result of [`Session::resolve_turn`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub report: TurnReport,
    /// Present once the turn ended the battle.
    pub conclusion: Option<BattleConclusion>,
}

#[derive(Debug)]
struct ActiveBattle {
    state: BattleState,
    scripted: Option<String>,
}

pub struct Session<'c, R> {
    content: &'c Content,
    repository: &'c dyn ProfileRepository,
    slot: String,
    profile: PlayerProfile,
    rng: R,
    active: Option<ActiveBattle>,
    unsaved: bool,
}

impl<'c, R: RngOracle> Session<'c, R> {
    pub fn new(
        content: &'c Content,
        repository: &'c dyn ProfileRepository,
        slot: impl Into<String>,
        profile: PlayerProfile,
        rng: R,
    ) -> Self {
        Self {
            content,
            repository,
            slot: slot.into(),
            profile,
            rng,
            active: None,
            unsaved: false,
        }
    }

    /// Opens a session on the profile saved in `slot`.
    pub fn load(
        content: &'c Content,
        repository: &'c dyn ProfileRepository,
        slot: impl Into<String>,
        rng: R,
    ) -> Result<Self> {
        let slot = slot.into();
        let profile = repository
            .load(&slot)?
            .ok_or_else(|| RuntimeError::ProfileNotFound(slot.clone()))?;
        info!(slot = %slot, name = %profile.name, level = profile.level, "profile loaded");
        Ok(Self::new(content, repository, slot, profile, rng))
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn battle(&self) -> Option<&BattleState> {
        self.active.as_ref().map(|active| &active.state)
    }

    pub fn in_battle(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the profile changed since it was last written.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn save(&mut self) -> Result<()> {
        self.repository.save(&self.slot, &self.profile)?;
        self.unsaved = false;
        debug!(slot = %self.slot, "profile saved");
        Ok(())
    }

    fn engine(&self) -> CombatEngine<'c> {
        let content: &'c Content = self.content;
        CombatEngine::new(content.env())
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.in_battle() {
            return Err(RuntimeError::BattleInProgress);
        }
        Ok(())
    }

    // ===== battle lifecycle =====

    /// Starts a battle against an ad-hoc enemy list.
    pub fn start_encounter(&mut self, enemies: &[EnemyTypeId]) -> Result<&BattleState> {
        self.begin(enemies, None)
    }

    /// Starts a scripted battle. Cleared encounters never trigger again.
    pub fn start_scripted(&mut self, encounter: &ScriptedEncounter) -> Result<&BattleState> {
        if self.profile.is_cleared(&encounter.id) {
            return Err(RuntimeError::EncounterCleared(encounter.id.clone()));
        }
        self.begin(&encounter.enemies, Some(encounter.id.clone()))
    }

    /// Rolls one map step against `table`, starting a battle when it triggers.
    pub fn step(&mut self, table: &EncounterTable) -> Result<Option<&BattleState>> {
        self.ensure_idle()?;
        let Some(group) = table.roll(&mut self.rng).map(<[EnemyTypeId]>::to_vec) else {
            return Ok(None);
        };
        self.begin(&group, None).map(Some)
    }

    fn begin(&mut self, enemies: &[EnemyTypeId], scripted: Option<String>) -> Result<&BattleState> {
        self.ensure_idle()?;
        let player = Combatant::from_profile(EntityId::PLAYER, &self.profile, &self.content.config);
        let state = self.engine().start(vec![player], enemies)?;

        info!(
            enemies = ?enemies,
            scripted = scripted.as_deref().unwrap_or("-"),
            hp = self.profile.hp,
            "battle started"
        );
        let active = self.active.insert(ActiveBattle { state, scripted });
        Ok(&active.state)
    }

    /// Queues the player's action for the current turn.
    pub fn act(&mut self, action: BattleAction) -> Result<()> {
        let engine = self.engine();
        let active = self.active.as_mut().ok_or(RuntimeError::NoActiveBattle)?;

        let kind = action.as_ref().to_string();
        if let Err(err) =
            engine.queue_action(&mut active.state, EntityId::PLAYER, action, &self.profile.inventory)
        {
            warn!(action = %kind, code = err.error_code(), "action rejected: {err}");
            return Err(err.into());
        }
        debug!(action = %kind, "action queued");
        Ok(())
    }

    /// Resolves the current turn, concluding the battle if it ended.
    pub fn resolve_turn(&mut self) -> Result<TurnOutcome> {
        let engine = self.engine();
        let active = self.active.as_mut().ok_or(RuntimeError::NoActiveBattle)?;

        let report =
            engine.resolve_turn(&mut active.state, &mut self.rng, &mut self.profile.inventory)?;
        debug!(
            turn = report.turn,
            events = report.events.len(),
            phase = %report.phase,
            "turn resolved"
        );

        let conclusion = match report.outcome() {
            Some(_) => Some(self.conclude()?),
            None => None,
        };
        Ok(TurnOutcome { report, conclusion })
    }

    fn conclude(&mut self) -> Result<BattleConclusion> {
        let active = self.active.take().ok_or(RuntimeError::NoActiveBattle)?;
        let Some(outcome) = active.state.outcome() else {
            self.active = Some(active);
            return Err(RuntimeError::BattleInProgress);
        };

        if let Some(player) = active.state.players().first() {
            self.profile.flush(player);
        }

        let mut conclusion = BattleConclusion {
            outcome,
            rewards: None,
            progression: None,
            penalty: None,
            cleared: None,
            quests_completed: Vec::new(),
            saved: false,
        };

        match outcome {
            BattleOutcome::Victory => {
                let rewards = active.state.rewards().unwrap_or_default();
                let report = award(
                    &mut self.profile,
                    rewards.xp,
                    rewards.money,
                    &self.content.config,
                );
                log_level_ups(&report.level_ups);
                conclusion.quests_completed = self
                    .profile
                    .quests
                    .record_kills(&rewards.defeated, &self.content.quests);
                if let Some(id) = active.scripted {
                    if self.profile.mark_cleared(id.clone()) {
                        conclusion.cleared = Some(id);
                    }
                }
                conclusion.rewards = Some(rewards);
                conclusion.progression = Some(report);
            }
            BattleOutcome::Defeat => {
                let penalty = apply_death_penalty(&mut self.profile);
                info!(
                    money_lost = penalty.money_lost,
                    hp = self.profile.hp,
                    "player defeated, respawning"
                );
                conclusion.penalty = Some(penalty);
            }
            BattleOutcome::Fled => {}
        }
        // Consumables spent in battle count against fetch objectives.
        self.refresh_fetch_objectives();
        for quest in &conclusion.quests_completed {
            info!(quest = %quest, "quest objectives complete");
        }

        info!(
            outcome = %outcome,
            turns = active.state.turn(),
            xp = self.profile.xp,
            money = self.profile.money,
            "battle ended"
        );
        self.unsaved = true;
        conclusion.saved = self.try_save();
        Ok(conclusion)
    }

    /// Saves after a battle, logging a failure instead of returning it.
    fn try_save(&mut self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(err) => {
                error!(slot = %self.slot, "failed to save profile after battle: {err}");
                false
            }
        }
    }

    // ===== profile management (outside battle) =====

    pub fn unlock_skill(&mut self, id: &SkillId) -> Result<()> {
        self.ensure_idle()?;
        unlock(&mut self.profile.skills, id, &self.content.skills)?;
        self.unsaved = true;
        info!(skill = %id, points_left = self.profile.skills.points(), "skill unlocked");
        Ok(())
    }

    pub fn allocate_stat(&mut self, stat: StatKind) -> Result<i32> {
        self.ensure_idle()?;
        let value = allocate_stat(&mut self.profile, stat)?;
        self.unsaved = true;
        Ok(value)
    }

    pub fn equip(&mut self, slot: EquipSlot, id: &ItemId) -> Result<Option<ItemId>> {
        self.ensure_idle()?;
        let displaced = self.profile.equip(slot, id)?;
        self.unsaved = true;
        Ok(displaced)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<Option<ItemId>> {
        self.ensure_idle()?;
        let removed = self.profile.unequip(slot);
        self.unsaved |= removed.is_some();
        Ok(removed)
    }

    /// Sells an equipment item for half its price.
    pub fn sell_equipment(&mut self, id: &ItemId) -> Result<u32> {
        self.ensure_idle()?;
        let proceeds = self.profile.sell_equipment(id)?;
        self.after_inventory_change();
        Ok(proceeds)
    }

    pub fn discard_equipment(&mut self, id: &ItemId) -> Result<()> {
        self.ensure_idle()?;
        self.profile.discard_equipment(id)?;
        self.after_inventory_change();
        Ok(())
    }

    /// Adds one unit of a catalog item to the inventory.
    pub fn acquire(&mut self, id: &ItemId) -> Result<()> {
        self.ensure_idle()?;
        let def = self
            .content
            .items
            .get(id)
            .ok_or_else(|| CombatError::ItemUnavailable(id.clone()))?;
        match &def.kind {
            ItemKind::Consumable { .. } => self.profile.inventory.add_consumable(id.clone(), 1),
            ItemKind::Equipment { .. } => {
                if let Some(item) = def.to_equipment() {
                    self.profile.inventory.stow(item);
                }
            }
        }
        self.after_inventory_change();
        debug!(item = %id, "item acquired");
        Ok(())
    }

    /// Picks up scrap: rolls the configured bonus-drop chance and, on success,
    /// adds one item from `pool`.
    pub fn pick_up_scrap(&mut self, pool: &[ItemId]) -> Result<Option<ItemId>> {
        self.ensure_idle()?;
        let chance = self.content.config.bonus_drop_chance;
        let Some(item) = roll_bonus_drop(&mut self.rng, chance, pool).cloned() else {
            return Ok(None);
        };
        self.acquire(&item)?;
        info!(item = %item, "bonus item dropped");
        Ok(Some(item))
    }

    fn after_inventory_change(&mut self) {
        self.unsaved = true;
        for quest in self.refresh_fetch_objectives() {
            info!(quest = %quest, "quest objectives complete");
        }
    }

    fn refresh_fetch_objectives(&mut self) -> Vec<QuestId> {
        self.profile
            .quests
            .record_inventory(&self.profile.inventory, &self.content.quests)
    }

    // ===== quests (outside battle) =====

    /// Current state of every quest offered or known to the player.
    pub fn quests(&self) -> Vec<(&QuestId, QuestState)> {
        self.profile.quests.overview(self.content.quests.iter())
    }

    /// Takes an available quest. Items already held count toward fetch
    /// objectives right away.
    pub fn accept_quest(&mut self, id: &QuestId) -> Result<QuestState> {
        self.ensure_idle()?;
        quest::accept(&mut self.profile.quests, id, &self.content.quests)?;
        self.refresh_fetch_objectives();
        self.unsaved = true;

        let state = self
            .profile
            .quests
            .entry(id)
            .map_or(QuestState::Active, |entry| entry.state);
        info!(quest = %id, state = %state, "quest accepted");
        Ok(state)
    }

    /// Records arriving at `location`, returning the quests it completed.
    pub fn visit(&mut self, location: &str) -> Result<Vec<QuestId>> {
        self.ensure_idle()?;
        let completed = self
            .profile
            .quests
            .record_visit(location, &self.content.quests);
        if !completed.is_empty() {
            self.unsaved = true;
        }
        for quest in &completed {
            info!(quest = %quest, location, "quest objectives complete");
        }
        Ok(completed)
    }

    /// Pays out a complete quest.
    pub fn claim_quest(&mut self, id: &QuestId) -> Result<QuestClaim> {
        self.ensure_idle()?;
        let claim = claim_rewards(
            &mut self.profile,
            id,
            &self.content.quests,
            &self.content.items,
            &self.content.config,
        )?;
        log_level_ups(&claim.progression.level_ups);
        self.after_inventory_change();
        info!(
            quest = %id,
            xp = claim.progression.xp_gained,
            money = claim.progression.money_gained,
            "quest rewards claimed"
        );
        Ok(claim)
    }
}

fn log_level_ups(level_ups: &[LevelUp]) {
    for up in level_ups {
        info!(
            level = up.level,
            max_hp_gain = up.max_hp_gain,
            stat_points = up.stat_points,
            skill_points = up.skill_points,
            "level up"
        );
    }
}
