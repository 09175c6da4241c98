//! Combat resolution system.
//!
//! Pure formulas live in [`hit`], [`damage`] and [`status`]; [`resolve_attack`]
//! combines them into a single attack. [`CombatEngine`] drives whole battles
//! over a [`BattleState`] and reports every change as a [`BattleEvent`].
//!
//! # Core Functions
//!
//! - `calculate_hit_chance`: Dexterity difference, clamped
//! - `calculate_damage`: `max(1, attack - defense)`
//! - `resolve_attack`: Ability roll, hit roll, damage
//! - `tick`: End-of-turn status and modifier countdown

pub mod damage;
pub mod hit;
pub mod result;
pub mod status;

mod action;
mod battle;
mod engine;
mod events;

pub use action::{BattleAction, QueuedAction};
pub use battle::{BattleOutcome, BattlePhase, BattleRewards, BattleState, Side};
pub use damage::{ability_damage, calculate_damage, defended_damage};
pub use engine::CombatEngine;
pub use events::{BattleEvent, TurnReport};
pub use hit::{calculate_hit_chance, check_hit, hit_chance};
pub use result::{AttackOutcome, AttackResult, resolve_attack};
pub use status::{TickReport, apply_status, cure, tick};
