//! File-based ProfileRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::PlayerProfile;

use crate::repository::{ProfileRepository, RepositoryError, Result};

/// File-based implementation of ProfileRepository.
///
/// Stores each slot as `profile_{slot}.json`. Writes go to a temporary file
/// first and are renamed into place.
pub struct FileProfileRepository {
    base_dir: PathBuf,
}

impl FileProfileRepository {
    /// Create a new file-based profile repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Get the path to a slot file.
    fn profile_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RepositoryError::InvalidSlot(slot.to_string()));
        }
        Ok(self.base_dir.join(format!("profile_{}.json", slot)))
    }
}

impl ProfileRepository for FileProfileRepository {
    fn save(&self, slot: &str, profile: &PlayerProfile) -> Result<()> {
        let path = self.profile_path(slot)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(profile)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved profile[{}] to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<PlayerProfile>> {
        let path = self.profile_path(slot)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let profile: PlayerProfile =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!("Loaded profile[{}] from {}", slot, path.display());

        Ok(Some(profile))
    }

    fn exists(&self, slot: &str) -> bool {
        self.profile_path(slot)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.profile_path(slot)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted profile[{}]", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            let slot = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| name.strip_prefix("profile_"))
                .and_then(|s| s.strip_suffix(".json"));
            if let Some(slot) = slot {
                slots.push(slot.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
