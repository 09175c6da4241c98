use crate::env::QuestOracle;
use crate::error::CombatError;
use crate::state::{QuestId, QuestLog, QuestState};

/// Moves an available quest to active and returns its new state.
///
/// A quest without objectives completes on the spot.
///
/// # Errors
///
/// - [`CombatError::UnknownQuest`] when the id is not in the registry
/// - [`CombatError::QuestUnavailable`] when the quest was already taken or its
///   prerequisite is not done
pub fn accept(
    log: &mut QuestLog,
    id: &QuestId,
    quests: &dyn QuestOracle,
) -> Result<QuestState, CombatError> {
    let def = quests
        .quest(id)
        .ok_or_else(|| CombatError::UnknownQuest(id.clone()))?;
    if log.state(def) != Some(QuestState::Available) {
        return Err(CombatError::QuestUnavailable(id.clone()));
    }
    Ok(log.start(def))
}
