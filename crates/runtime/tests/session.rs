//! End-to-end battle sessions over the bundled content.
//!
//! Default player: 30 HP, 10 SP, attack 3 + STR 5 = 8, RES 3, DEX 5.
//! Scrap Rat: 12 HP, attack 4, defense 1, DEX 3, 8 XP, 5 money.

use std::sync::atomic::{AtomicBool, Ordering};

use game_content::{Content, bundled};
use game_core::{
    BattleAction, BattleOutcome, CombatError, EnemyTypeId, EquipSlot, Inventory, ItemId,
    PlayerProfile, QuestId, QuestState, ScriptedRng, StatKind, quest,
};
use runtime::{
    EncounterTable, FileProfileRepository, InMemoryProfileRepo, ProfileRepository,
    RepositoryError, RuntimeError, ScriptedEncounter, Session,
};
use tempfile::TempDir;

const SLOT: &str = "slot1";

fn content() -> Content {
    bundled::load().expect("bundled content")
}

fn rat_gate() -> ScriptedEncounter {
    ScriptedEncounter::new("gate_rat", [EnemyTypeId::from("scrap_rat")])
}

fn first_enemy(session: &Session<'_, ScriptedRng>) -> game_core::EntityId {
    session.battle().expect("battle").enemies()[0].id
}

/// Player hits, rat misses, player hits again and wins.
fn beat_one_rat(session: &mut Session<'_, ScriptedRng>) -> runtime::BattleConclusion {
    session
        .start_encounter(&[EnemyTypeId::from("scrap_rat")])
        .unwrap();
    let target = first_enemy(session);
    session.act(BattleAction::attack(target)).unwrap();
    session.resolve_turn().unwrap();
    session.act(BattleAction::attack(target)).unwrap();
    session
        .resolve_turn()
        .unwrap()
        .conclusion
        .expect("battle should end")
}

/// In-memory repository whose writes can be switched off.
#[derive(Default)]
struct FlakyRepo {
    inner: InMemoryProfileRepo,
    failing: AtomicBool,
}

impl ProfileRepository for FlakyRepo {
    fn save(&self, slot: &str, profile: &PlayerProfile) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Io(std::io::Error::other("disk full")));
        }
        self.inner.save(slot, profile)
    }

    fn load(&self, slot: &str) -> Result<Option<PlayerProfile>, RepositoryError> {
        self.inner.load(slot)
    }

    fn exists(&self, slot: &str) -> bool {
        self.inner.exists(slot)
    }

    fn delete(&self, slot: &str) -> Result<(), RepositoryError> {
        self.inner.delete(slot)
    }
}

#[test]
fn victory_awards_rewards_and_saves() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    // turn 1: player hits, rat misses; turn 2: player hits and kills
    let rng = ScriptedRng::new([0.0, 0.99, 0.0]);
    let mut session = Session::new(&content, &repo, SLOT, PlayerProfile::new("Ada"), rng);

    session.start_scripted(&rat_gate()).unwrap();

    let target = first_enemy(&session);
    session.act(BattleAction::attack(target)).unwrap();
    let first = session.resolve_turn().unwrap();
    assert!(first.conclusion.is_none());
    assert_eq!(session.battle().unwrap().enemies()[0].hp.current(), 5);

    session.act(BattleAction::attack(target)).unwrap();
    let second = session.resolve_turn().unwrap();
    let conclusion = second.conclusion.expect("battle should end");

    assert_eq!(conclusion.outcome, BattleOutcome::Victory);
    let rewards = conclusion.rewards.unwrap();
    assert_eq!((rewards.xp, rewards.money), (8, 5));
    assert_eq!(conclusion.cleared.as_deref(), Some("gate_rat"));
    assert!(conclusion.saved);
    assert!(!session.in_battle());
    assert!(!session.has_unsaved_changes());

    let saved = repo.load(SLOT).unwrap().unwrap();
    assert_eq!(saved.xp, 8);
    assert_eq!(saved.money, 5);
    assert_eq!(saved.hp, 30);
    assert!(saved.is_cleared("gate_rat"));
}

#[test]
fn cleared_scripted_encounter_never_triggers_again() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut profile = PlayerProfile::new("Ada");
    profile.mark_cleared("gate_rat");
    let mut session = Session::new(&content, &repo, SLOT, profile, ScriptedRng::default());

    let err = session.start_scripted(&rat_gate()).unwrap_err();
    assert!(matches!(err, RuntimeError::EncounterCleared(id) if id == "gate_rat"));
    assert!(!session.in_battle());
}

#[test]
fn victory_can_level_up() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut profile = PlayerProfile::new("Ada");
    profile.xp = 15;
    profile.hp = 20;
    let rng = ScriptedRng::new([0.0, 0.99, 0.0]);
    let mut session = Session::new(&content, &repo, SLOT, profile, rng);

    session
        .start_encounter(&[EnemyTypeId::from("scrap_rat")])
        .unwrap();
    let target = first_enemy(&session);
    session.act(BattleAction::attack(target)).unwrap();
    session.resolve_turn().unwrap();
    session.act(BattleAction::attack(target)).unwrap();
    let conclusion = session.resolve_turn().unwrap().conclusion.unwrap();

    let progression = conclusion.progression.unwrap();
    assert_eq!(progression.final_level(), Some(2));
    let profile = session.profile();
    assert_eq!(profile.level, 2);
    assert_eq!(profile.xp, 23);
    assert_eq!(profile.base.max_hp, 31);
    assert_eq!(profile.hp, 31);
    assert_eq!(profile.stat_points, 2);
    assert_eq!(profile.skills.points(), 1);
}

#[test]
fn defeat_applies_death_penalty() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut profile = PlayerProfile::new("Ada");
    profile.hp = 1;
    profile.money = 11;
    // golem: no ability (0.9 >= 0.25), then hits (0.0)
    let rng = ScriptedRng::new([0.9, 0.0]);
    let mut session = Session::new(&content, &repo, SLOT, profile, rng);

    session
        .start_encounter(&[EnemyTypeId::from("rust_golem")])
        .unwrap();
    session.act(BattleAction::Defend).unwrap();
    let conclusion = session.resolve_turn().unwrap().conclusion.unwrap();

    assert_eq!(conclusion.outcome, BattleOutcome::Defeat);
    assert_eq!(conclusion.penalty.unwrap().money_lost, 6);
    assert!(conclusion.rewards.is_none());

    let saved = repo.load(SLOT).unwrap().unwrap();
    assert_eq!(saved.money, 5);
    assert_eq!(saved.hp, 15);
    assert_eq!(saved.sp, 10);
    assert_eq!(saved.xp, 0);
}

#[test]
fn fleeing_keeps_damage_but_grants_nothing() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut profile = PlayerProfile::new("Ada");
    profile.hp = 17;
    let mut session = Session::new(&content, &repo, SLOT, profile, ScriptedRng::new([0.1]));

    session
        .start_encounter(&[EnemyTypeId::from("volt_wraith")])
        .unwrap();
    session.act(BattleAction::Flee).unwrap();
    let conclusion = session.resolve_turn().unwrap().conclusion.unwrap();

    assert_eq!(conclusion.outcome, BattleOutcome::Fled);
    assert!(conclusion.rewards.is_none());
    assert!(conclusion.penalty.is_none());
    let saved = repo.load(SLOT).unwrap().unwrap();
    assert_eq!(saved.hp, 17);
    assert_eq!(saved.money, 0);
}

#[test]
fn battle_lifecycle_guards() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut session = Session::new(
        &content,
        &repo,
        SLOT,
        PlayerProfile::new("Ada"),
        ScriptedRng::default(),
    );

    assert!(matches!(
        session.act(BattleAction::Defend),
        Err(RuntimeError::NoActiveBattle)
    ));
    assert!(matches!(
        session.resolve_turn(),
        Err(RuntimeError::NoActiveBattle)
    ));

    session
        .start_encounter(&[EnemyTypeId::from("scrap_rat")])
        .unwrap();
    assert!(matches!(
        session.start_encounter(&[EnemyTypeId::from("scrap_rat")]),
        Err(RuntimeError::BattleInProgress)
    ));
    assert!(matches!(
        session.allocate_stat(StatKind::Strength),
        Err(RuntimeError::BattleInProgress)
    ));
    assert!(matches!(
        session.unequip(EquipSlot::Weapon),
        Err(RuntimeError::BattleInProgress)
    ));
    assert!(matches!(
        session.acquire(&ItemId::from("repair_kit")),
        Err(RuntimeError::BattleInProgress)
    ));
    assert!(matches!(
        session.accept_quest(&QuestId::from("pest_control")),
        Err(RuntimeError::BattleInProgress)
    ));
    assert_eq!(session.profile().inventory.count(&"repair_kit".into()), 0);
}

#[test]
fn rejected_action_leaves_turn_open() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut session = Session::new(
        &content,
        &repo,
        SLOT,
        PlayerProfile::new("Ada"),
        ScriptedRng::default(),
    );
    session
        .start_encounter(&[EnemyTypeId::from("scrap_rat")])
        .unwrap();

    let err = session
        .act(BattleAction::skill("spark_bolt", None))
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Combat(CombatError::NotUnlocked(_))
    ));
    assert!(session.battle().unwrap().queued().is_empty());

    session.act(BattleAction::Defend).unwrap();
}

#[test]
fn unknown_enemy_type_does_not_start_a_battle() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut session = Session::new(
        &content,
        &repo,
        SLOT,
        PlayerProfile::new("Ada"),
        ScriptedRng::default(),
    );

    let err = session
        .start_encounter(&[EnemyTypeId::from("missing")])
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Combat(CombatError::UnknownEnemyType(_))
    ));
    assert!(!session.in_battle());
}

#[test]
fn random_step_rolls_trigger_then_group() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let table = EncounterTable::new(0.5)
        .with_group([EnemyTypeId::from("scrap_rat")])
        .with_group([
            EnemyTypeId::from("scrap_rat"),
            EnemyTypeId::from("slag_hound"),
        ]);
    let rng = ScriptedRng::new([0.9, 0.1, 0.75]);
    let mut session = Session::new(&content, &repo, SLOT, PlayerProfile::new("Ada"), rng);

    assert!(session.step(&table).unwrap().is_none());
    let battle = session.step(&table).unwrap().expect("encounter");
    assert_eq!(battle.enemies().len(), 2);
}

#[test]
fn profile_management_between_battles() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut profile = PlayerProfile::new("Ada");
    profile.skills.grant_points(1);
    profile.stat_points = 1;
    let mut session = Session::new(&content, &repo, SLOT, profile, ScriptedRng::new([0.1, 0.0]));

    session.unlock_skill(&"spark_bolt".into()).unwrap();
    assert!(session.profile().skills.is_unlocked(&"spark_bolt".into()));

    assert_eq!(session.allocate_stat(StatKind::Strength).unwrap(), 6);

    let wrench = ItemId::from("pipe_wrench");
    session.acquire(&wrench).unwrap();
    assert_eq!(session.equip(EquipSlot::Weapon, &wrench).unwrap(), None);
    assert_eq!(session.profile().effective(StatKind::Strength), 8);
    assert_eq!(session.sell_equipment(&wrench).unwrap(), 10);
    assert_eq!(session.profile().money, 10);
    assert_eq!(session.profile().effective(StatKind::Strength), 6);

    let pool = [ItemId::from("repair_kit")];
    let dropped = session.pick_up_scrap(&pool).unwrap();
    assert_eq!(dropped, Some(ItemId::from("repair_kit")));
    assert_eq!(session.profile().inventory.count(&pool[0]), 1);
}

#[test]
fn load_reads_file_repository_slot() {
    let dir = TempDir::new().unwrap();
    let repo = FileProfileRepository::new(dir.path()).unwrap();
    let content = content();

    let missing = Session::load(&content, &repo, SLOT, ScriptedRng::default());
    assert!(matches!(missing, Err(RuntimeError::ProfileNotFound(slot)) if slot == SLOT));

    let mut profile = PlayerProfile::new("Ada");
    profile.money = 42;
    repo.save(SLOT, &profile).unwrap();

    let session = Session::load(&content, &repo, SLOT, ScriptedRng::default()).unwrap();
    assert_eq!(session.profile().money, 42);
    assert_eq!(session.slot(), SLOT);
}

#[test]
fn failed_save_keeps_the_battle_result() {
    let content = content();
    let repo = FlakyRepo::default();
    repo.failing.store(true, Ordering::SeqCst);
    let rng = ScriptedRng::new([0.0, 0.99, 0.0]);
    let mut session = Session::new(&content, &repo, SLOT, PlayerProfile::new("Ada"), rng);

    let conclusion = beat_one_rat(&mut session);

    assert_eq!(conclusion.outcome, BattleOutcome::Victory);
    assert!(!conclusion.saved);
    assert_eq!(conclusion.rewards.unwrap().xp, 8);
    assert!(!session.in_battle());
    assert!(session.has_unsaved_changes());
    assert_eq!(session.profile().xp, 8);
    assert!(repo.load(SLOT).unwrap().is_none());

    assert!(matches!(session.save(), Err(RuntimeError::Repository(_))));
    assert!(session.has_unsaved_changes());

    repo.failing.store(false, Ordering::SeqCst);
    session.save().unwrap();
    assert!(!session.has_unsaved_changes());
    assert_eq!(repo.load(SLOT).unwrap().unwrap().xp, 8);
}

#[test]
fn victories_advance_kill_quests_and_claims_pay_out() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let pests = QuestId::from("pest_control");
    let mut profile = PlayerProfile::new("Ada");
    quest::accept(&mut profile.quests, &pests, &content.quests).unwrap();
    profile.quests.record_kills(
        &[EnemyTypeId::from("scrap_rat"), "scrap_rat".into(), "scrap_rat".into()],
        &content.quests,
    );
    let rng = ScriptedRng::new([0.0, 0.99, 0.0]);
    let mut session = Session::new(&content, &repo, SLOT, profile, rng);

    let conclusion = beat_one_rat(&mut session);
    assert_eq!(conclusion.quests_completed, vec![pests.clone()]);
    assert!(repo.load(SLOT).unwrap().unwrap().quests.has_completable());

    let claim = session.claim_quest(&pests).unwrap();
    assert_eq!(claim.progression.final_level(), Some(3));
    assert_eq!(claim.items, vec![(ItemId::from("repair_kit"), 2)]);
    assert_eq!(session.profile().xp, 58);
    assert_eq!(session.profile().money, 105);
    assert_eq!(session.profile().inventory.count(&"repair_kit".into()), 2);
    assert!(session.has_unsaved_changes());

    assert!(matches!(
        session.claim_quest(&pests),
        Err(RuntimeError::Combat(CombatError::QuestNotComplete(_)))
    ));

    session.save().unwrap();
    assert!(repo.load(SLOT).unwrap().unwrap().quests.is_done(&pests));
}

#[test]
fn fetch_quests_follow_the_inventory() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut session = Session::new(
        &content,
        &repo,
        SLOT,
        PlayerProfile::new("Ada"),
        ScriptedRng::default(),
    );
    let cell = ItemId::from("battery_cell");
    let spare_parts = QuestId::from("spare_parts");
    let restore = QuestId::from("circuit_restore");

    assert!(!session.quests().contains(&(&restore, QuestState::Available)));
    assert!(matches!(
        session.accept_quest(&restore),
        Err(RuntimeError::Combat(CombatError::QuestUnavailable(_)))
    ));

    session.acquire(&cell).unwrap();
    session.acquire(&cell).unwrap();
    assert_eq!(session.accept_quest(&spare_parts).unwrap(), QuestState::Active);
    assert_eq!(
        session.profile().quests.entry(&spare_parts).unwrap().progress,
        vec![2]
    );

    session.acquire(&cell).unwrap();
    assert_eq!(session.quests()[0], (&spare_parts, QuestState::Complete));

    let claim = session.claim_quest(&spare_parts).unwrap();
    assert_eq!(claim.progression.money_gained, 75);
    assert_eq!(session.profile().inventory.count(&cell), 3);
    assert!(session.quests().contains(&(&restore, QuestState::Available)));
}

#[test]
fn visits_only_complete_quests_with_nothing_else_left() {
    let content = content();
    let repo = InMemoryProfileRepo::new();
    let mut session = Session::new(
        &content,
        &repo,
        SLOT,
        PlayerProfile::new("Ada"),
        ScriptedRng::default(),
    );
    let recon = QuestId::from("deep_recon");
    session.accept_quest(&recon).unwrap();

    assert!(session.visit("scrap_cave").unwrap().is_empty());
    let entry = session.profile().quests.entry(&recon).unwrap();
    assert_eq!(entry.state, QuestState::Active);
    assert_eq!(entry.progress, vec![1, 0]);
}
