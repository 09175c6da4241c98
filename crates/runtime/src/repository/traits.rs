//! Repository contract for saving and loading player profiles.

use game_core::PlayerProfile;

use super::Result;

/// Persistence collaborator for [`PlayerProfile`]s, keyed by save slot.
///
/// Only the persisted shape crosses this boundary: battle state, status
/// effects and temporary modifiers never do.
pub trait ProfileRepository: Send + Sync {
    /// Save a profile, replacing whatever the slot held.
    fn save(&self, slot: &str, profile: &PlayerProfile) -> Result<()>;

    /// Load the profile in `slot`, if any.
    fn load(&self, slot: &str) -> Result<Option<PlayerProfile>>;

    /// Check if a slot holds a profile.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all occupied slots, sorted.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
