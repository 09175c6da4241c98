//! In-memory ProfileRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use game_core::PlayerProfile;

use crate::repository::{ProfileRepository, RepositoryError, Result};

/// In-memory implementation of ProfileRepository.
pub struct InMemoryProfileRepo {
    profiles: RwLock<BTreeMap<String, PlayerProfile>>,
}

impl InMemoryProfileRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create with one profile already saved in `slot`.
    pub fn with_profile(slot: impl Into<String>, profile: PlayerProfile) -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(slot.into(), profile);
        Self {
            profiles: RwLock::new(profiles),
        }
    }
}

impl Default for InMemoryProfileRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileRepository for InMemoryProfileRepo {
    fn save(&self, slot: &str, profile: &PlayerProfile) -> Result<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        profiles.insert(slot.to_string(), profile.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<PlayerProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(profiles.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.profiles
            .read()
            .map(|profiles| profiles.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        profiles.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(profiles.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_delete() {
        let repo = InMemoryProfileRepo::new();
        let mut profile = PlayerProfile::new("Ada");
        profile.money = 42;

        repo.save("slot1", &profile).unwrap();
        assert!(repo.exists("slot1"));
        assert_eq!(repo.load("slot1").unwrap(), Some(profile));
        assert_eq!(repo.list_slots().unwrap(), vec!["slot1".to_string()]);

        repo.delete("slot1").unwrap();
        assert!(!repo.exists("slot1"));
        assert_eq!(repo.load("slot1").unwrap(), None);
    }
}
