//! Deterministic combat and progression rules shared by the runtime and tools.
//!
//! `game-core` defines the canonical rules (stats, equipment, status effects,
//! skills, combat resolution, progression, quests) and exposes pure APIs that
//! perform no I/O. Battles flow through [`combat::CombatEngine`]; randomness enters
//! only through the [`env::RngOracle`] seam so every outcome can be replayed
//! from a seed.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod progression;
pub mod quest;
pub mod skill;
pub mod state;
pub mod stats;

pub use combat::{
    AttackOutcome, AttackResult, BattleAction, BattleEvent, BattleOutcome, BattlePhase,
    BattleRewards, BattleState, CombatEngine, QueuedAction, Side, TurnReport,
};
pub use config::{GameConfig, HitChanceParams};
pub use env::{
    ChaChaRng, ConsumableEffect, EnemyCatalog, EnemyOracle, EnemyTypeDef, Env, Inventory,
    ItemCatalog, ItemDef, ItemKind, ItemOracle, QuestCatalog, QuestDef, QuestObjective,
    QuestOracle, QuestRewards, RngOracle, ScalingStat, ScriptedRng, SkillCatalog, SkillDef,
    SkillEffectKind, SkillOracle, SpecialAbility,
};
pub use error::{CombatError, ErrorSeverity, GameError};
pub use progression::{
    DeathPenalty, LevelUp, ProgressionReport, allocate_stat, apply_death_penalty, award,
};
pub use quest::{QuestClaim, claim_rewards};
pub use state::{
    Combatant, CombatantKind, EnemyTypeId, EntityId, EquipSlot, Equipment, EquipmentItem,
    InventoryState, ItemId, PlayerProfile, QuestEntry, QuestId, QuestLog, QuestState, SkillBook,
    SkillId, StatusEffect, StatusEffects, StatusKind,
};
pub use stats::{BaseStats, DerivedStats, ResourceMeter, StatBonuses, StatKind, StatModifiers};
