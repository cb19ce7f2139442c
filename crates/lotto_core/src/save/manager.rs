use super::error::SaveError;
use super::format::{decode, encode};
use super::store::KeyValueStore;
use super::STATS_KEY;
use crate::ledger::LedgerState;

/// Reads and writes the single stats entry in a [`KeyValueStore`].
#[derive(Debug)]
pub struct SaveManager<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SaveManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STATS_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self { store, key: key.to_string() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Load history; absence or an unreadable record both mean an empty history.
    pub fn load(&self) -> LedgerState {
        match self.load_strict() {
            Ok(Some(state)) => state,
            Ok(None) => {
                log::debug!("No stats under '{}', starting fresh", self.key);
                LedgerState::default()
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("Could not load stats from '{}': {}; starting fresh", self.key, e);
                LedgerState::default()
            }
            Err(e) => {
                log::error!("Stats key '{}' is unusable: {}; starting fresh", self.key, e);
                LedgerState::default()
            }
        }
    }

    /// Load history, surfacing unreadable records. `Ok(None)` when nothing is stored.
    pub fn load_strict(&self) -> Result<Option<LedgerState>, SaveError> {
        match self.store.get(&self.key)? {
            Some(blob) => decode(&blob).map(Some),
            None => Ok(None),
        }
    }

    /// Write the full state through to the store.
    pub fn save(&mut self, state: &LedgerState) -> Result<(), SaveError> {
        let blob = encode(state)?;
        self.store.set(&self.key, &blob)?;
        log::debug!("Saved stats to '{}' ({} bytes)", self.key, blob.len());
        Ok(())
    }

    pub fn exists(&self) -> bool {
        matches!(self.store.get(&self.key), Ok(Some(_)))
    }

    pub fn delete(&mut self) -> Result<(), SaveError> {
        self.store.remove(&self.key)?;
        log::info!("Deleted stats entry '{}'", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::MatchResult;
    use crate::ledger::{ClassicLedger, Mode};
    use crate::save::store::{FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_missing_entry_is_empty_history() {
        let manager = SaveManager::new(MemoryStore::new());
        assert!(!manager.exists());
        assert_eq!(manager.load(), LedgerState::default());
        assert!(manager.load_strict().unwrap().is_none());
    }

    #[test]
    fn test_garbage_entry_is_empty_history() {
        let manager = SaveManager::new(MemoryStore::with_entry(STATS_KEY, "}{"));
        assert_eq!(manager.load(), LedgerState::default());
        assert!(manager.load_strict().is_err());
    }

    #[test]
    fn test_legacy_entry_migrates_on_load() {
        let store = MemoryStore::with_entry(STATS_KEY, r#"{"gamesPlayed":7,"wins":1}"#);
        let state = SaveManager::new(store).load();
        assert_eq!(state.classic, ClassicLedger { games_played: 7, wins: 1 });
    }

    #[test]
    fn test_load_then_save_is_idempotent() {
        let blob = r#"{"classic":{"gamesPlayed":40,"wins":0},"terrybucks":{"gamesPlayed":2,"wins":0,"debt":3,"totalPayouts":1,"partialWins":1}}"#;
        let mut manager = SaveManager::new(MemoryStore::with_entry(STATS_KEY, blob));

        let state = manager.load();
        manager.save(&state).unwrap();

        assert_eq!(manager.store().get(STATS_KEY).unwrap().as_deref(), Some(blob));
    }

    #[test]
    fn test_file_backed_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = LedgerState::new();
        state.record_play(Mode::TerryBucks, &MatchResult::new(3, true));

        let mut manager = SaveManager::new(FileStore::new(temp_dir.path()));
        manager.save(&state).unwrap();
        assert!(temp_dir.path().join("powerballStats.json").exists());

        let reopened = SaveManager::new(FileStore::new(temp_dir.path()));
        assert_eq!(reopened.load(), state);

        let mut reopened = reopened;
        reopened.delete().unwrap();
        assert!(!reopened.exists());
    }
}
