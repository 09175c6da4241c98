//! Common error infrastructure for game-core.
//!
//! Every rule in this crate reports failure through [`CombatError`]. All of
//! its variants are local, recoverable conditions: the caller rejects the
//! request and re-prompts, and no variant is raised after state was mutated.
//!
//! # Design Principles
//!
//! - **Type Safety**: each variant carries the ids and amounts involved
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable Codes**: `error_code()` gives a string usable in logs and tests

use crate::combat::Side;
use crate::state::{EnemyTypeId, EntityId, EquipSlot, ItemId, QuestId, SkillId};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: not enough SP, target already defeated
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown skill id, item in the wrong slot
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - game state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by equipment, skill, progression, quest and battle operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// Item does not fit the requested equipment slot.
    #[error("item belongs in the {found} slot, not {expected}")]
    InvalidSlot { expected: EquipSlot, found: EquipSlot },

    /// Skill prerequisite has not been unlocked yet.
    #[error("skill '{skill}' requires '{prerequisite}' to be unlocked first")]
    PrerequisiteNotMet { skill: SkillId, prerequisite: SkillId },

    /// Not enough skill or stat points.
    #[error("not enough points: need {needed}, have {available}")]
    InsufficientPoints { needed: u32, available: u32 },

    /// Skill is not castable by this combatant.
    #[error("skill '{0}' is not unlocked")]
    NotUnlocked(SkillId),

    /// Caster does not have enough SP.
    #[error("not enough SP: need {needed}, have {available}")]
    InsufficientSp { needed: u32, available: u32 },

    /// Target is defeated or not a legal target for the action.
    #[error("invalid target {0}")]
    InvalidTarget(EntityId),

    /// Skill id is not present in the skill catalog.
    #[error("unknown skill '{0}'")]
    UnknownSkill(SkillId),

    /// Skill is already unlocked.
    #[error("skill '{0}' is already unlocked")]
    AlreadyUnlocked(SkillId),

    /// Inventory has no usable copy of the item.
    #[error("item '{0}' is not available")]
    ItemUnavailable(ItemId),

    /// No combatant with this id takes part in the battle.
    #[error("combatant {0} not found")]
    ActorNotFound(EntityId),

    /// Acting combatant has no HP left.
    #[error("combatant {0} is defeated")]
    ActorDefeated(EntityId),

    /// Combatant already queued an action this turn.
    #[error("combatant {0} already has a queued action")]
    ActionAlreadyQueued(EntityId),

    /// Battle already reached a terminal state.
    #[error("battle is over")]
    BattleOver,

    /// A battle cannot start with an empty side.
    #[error("{0} side has no combatants")]
    EmptySide(Side),

    /// Encounter references an enemy type missing from the registry.
    #[error("unknown enemy type '{0}'")]
    UnknownEnemyType(EnemyTypeId),

    /// Quest id is not present in the quest registry.
    #[error("unknown quest '{0}'")]
    UnknownQuest(QuestId),

    /// Quest is already taken or its prerequisite is not done.
    #[error("quest '{0}' is not available")]
    QuestUnavailable(QuestId),

    /// Quest objectives are not all met, or the rewards were already claimed.
    #[error("quest '{0}' is not complete")]
    QuestNotComplete(QuestId),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            InsufficientPoints { .. } | InsufficientSp { .. } => ErrorSeverity::Recoverable,
            InvalidTarget(_) | ActorDefeated(_) | ActionAlreadyQueued(_) => {
                ErrorSeverity::Recoverable
            }
            ItemUnavailable(_) | PrerequisiteNotMet { .. } => ErrorSeverity::Recoverable,
            QuestUnavailable(_) | QuestNotComplete(_) => ErrorSeverity::Recoverable,
            InvalidSlot { .. } | NotUnlocked(_) | UnknownSkill(_) | AlreadyUnlocked(_) => {
                ErrorSeverity::Validation
            }
            ActorNotFound(_) | BattleOver | EmptySide(_) | UnknownEnemyType(_) => {
                ErrorSeverity::Validation
            }
            UnknownQuest(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            InvalidSlot { .. } => "COMBAT_INVALID_SLOT",
            PrerequisiteNotMet { .. } => "COMBAT_PREREQUISITE_NOT_MET",
            InsufficientPoints { .. } => "COMBAT_INSUFFICIENT_POINTS",
            NotUnlocked(_) => "COMBAT_NOT_UNLOCKED",
            InsufficientSp { .. } => "COMBAT_INSUFFICIENT_SP",
            InvalidTarget(_) => "COMBAT_INVALID_TARGET",
            UnknownSkill(_) => "COMBAT_UNKNOWN_SKILL",
            AlreadyUnlocked(_) => "COMBAT_ALREADY_UNLOCKED",
            ItemUnavailable(_) => "COMBAT_ITEM_UNAVAILABLE",
            ActorNotFound(_) => "COMBAT_ACTOR_NOT_FOUND",
            ActorDefeated(_) => "COMBAT_ACTOR_DEFEATED",
            ActionAlreadyQueued(_) => "COMBAT_ACTION_ALREADY_QUEUED",
            BattleOver => "COMBAT_BATTLE_OVER",
            EmptySide(_) => "COMBAT_EMPTY_SIDE",
            UnknownEnemyType(_) => "COMBAT_UNKNOWN_ENEMY_TYPE",
            UnknownQuest(_) => "QUEST_UNKNOWN",
            QuestUnavailable(_) => "QUEST_UNAVAILABLE",
            QuestNotComplete(_) => "QUEST_NOT_COMPLETE",
        }
    }
}
