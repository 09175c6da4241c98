//! Skill tree unlocking.

use crate::env::SkillOracle;
use crate::error::CombatError;
use crate::state::{SkillBook, SkillId};

/// Unlocks a skill, deducting exactly its `unlock_cost`.
///
/// Checks run in order and the first failure wins; a failed unlock leaves the
/// book untouched.
///
/// # Errors
///
/// - [`CombatError::UnknownSkill`] when the id is not in the skill tree
/// - [`CombatError::AlreadyUnlocked`] when the skill is already unlocked
/// - [`CombatError::PrerequisiteNotMet`] for a tier 1+ skill whose prerequisite is locked
/// - [`CombatError::InsufficientPoints`] when the book holds fewer points than the cost
pub fn unlock(
    book: &mut SkillBook,
    id: &SkillId,
    skills: &dyn SkillOracle,
) -> Result<(), CombatError> {
    let def = skills
        .skill(id)
        .ok_or_else(|| CombatError::UnknownSkill(id.clone()))?;

    if book.is_unlocked(id) {
        return Err(CombatError::AlreadyUnlocked(id.clone()));
    }

    if def.tier > 0 {
        if let Some(prerequisite) = &def.prerequisite {
            if !book.is_unlocked(prerequisite) {
                return Err(CombatError::PrerequisiteNotMet {
                    skill: id.clone(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }
    }

    if book.points() < def.unlock_cost {
        return Err(CombatError::InsufficientPoints {
            needed: def.unlock_cost,
            available: book.points(),
        });
    }

    book.record_unlock(id.clone(), def.unlock_cost);
    Ok(())
}

/// Skills that [`unlock`] would currently accept, ignoring point cost.
pub fn unlockable<'a>(
    book: &SkillBook,
    candidates: impl IntoIterator<Item = &'a crate::env::SkillDef>,
) -> Vec<&'a SkillId> {
    candidates
        .into_iter()
        .filter(|def| !book.is_unlocked(&def.id))
        .filter(|def| {
            def.tier == 0
                || def
                    .prerequisite
                    .as_ref()
                    .is_none_or(|prerequisite| book.is_unlocked(prerequisite))
        })
        .map(|def| &def.id)
        .collect()
}
