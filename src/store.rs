use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::AppState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode state: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to create state directory: {0}")]
    Directory(String),
}

/// Persistence for the whole [`AppState`]: one JSON blob at a fixed path.
/// Load happens once at startup, save after every mutation; there is a
/// single writer so last-write-wins is fine.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Open a store at the given path, creating parent directories.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Directory(e.to_string()))?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, or None when nothing was saved yet.
    pub fn load(&self) -> Result<Option<AppState>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&contents).map_err(StoreError::Decode)?;
        Ok(Some(state))
    }

    /// Load the persisted state, degrading to the default dataset when the
    /// blob is missing or unreadable. Failures are logged, never surfaced.
    pub fn load_or_default(&self) -> AppState {
        match self.load() {
            Ok(Some(state)) => state,
            Ok(None) => AppState::default(),
            Err(e) => {
                log::warn!("Failed to load state from {:?}, using defaults: {}", self.path, e);
                AppState::default()
            }
        }
    }

    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(state).map_err(StoreError::Encode)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Best-effort save after a mutation. A failed save must not block the
    /// UI, so it is only logged.
    pub fn save_best_effort(&self, state: &AppState) {
        if let Err(e) = self.save(state) {
            log::error!("Failed to save state to {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, Urgency};

    fn temp_store(name: &str) -> StateStore {
        let path = std::env::temp_dir()
            .join(format!("atomik-store-test-{}-{}", std::process::id(), name))
            .join("state.json");
        let _ = fs::remove_file(&path);
        StateStore::open(path).unwrap()
    }

    #[test]
    fn load_missing_returns_none() {
        let store = temp_store("missing");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        let mut state = AppState::default();
        state.weekly_points = 42;
        state.total_xp = 420;
        state.tomorrow_tasks.push(Task::new(
            "tm-1".to_string(),
            "Water the plants".to_string(),
            Urgency::Low,
        ));

        store.save(&state).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.weekly_points, 42);
        assert_eq!(loaded.total_xp, 420);
        assert_eq!(loaded.tomorrow_tasks.len(), 1);
        assert_eq!(loaded.tomorrow_tasks[0].name, "Water the plants");
        assert_eq!(loaded.tomorrow_tasks[0].points, 5);
    }

    #[test]
    fn corrupt_blob_is_an_error_and_falls_back_to_default() {
        let store = temp_store("corrupt");
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_err());

        let state = store.load_or_default();
        assert_eq!(state.today_tasks.len(), 4);
        assert_eq!(state.weekly_goal, 250);
        assert_eq!(state.daily_streak, 3);
        assert_eq!(state.total_xp, 0);
    }
}
