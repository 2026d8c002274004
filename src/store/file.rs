use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::types::{normalize_name, SessionState};
use crate::error::StoreError;

/// JSON file holding the whole session document.
///
/// Every read and every read-modify-write goes through one mutex, so two
/// requests can never interleave between loading and saving the document.
pub struct SessionStore {
    path: PathBuf,
    host: String,
    cutoff_hour: u8,
    lock: Mutex<()>,
}

impl SessionStore {
    /// `host` and `cutoff_hour` seed the state returned while no file exists yet.
    pub fn new(path: impl Into<PathBuf>, host: impl Into<String>, cutoff_hour: u8) -> Self {
        SessionStore {
            path: path.into(),
            host: host.into(),
            cutoff_hour,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SessionState, StoreError> {
        let _guard = self.guard();
        self.read()
    }

    pub fn save(&self, state: &SessionState) -> Result<(), StoreError> {
        let _guard = self.guard();
        self.write(state)
    }

    /// Writes the default document if no file exists yet, so operators have
    /// a file to seed teams into. Returns whether a file was created.
    pub fn init(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&self.load()?)?;
        log::info!("Created session file {}", self.path.display());
        Ok(true)
    }

    /// Loads the document, hands it to `f` and saves it if `f` succeeds.
    /// Nothing is written when `f` returns an error.
    pub fn update<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut SessionState) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _guard = self.guard();
        let mut state = self.read()?;
        let result = f(&mut state)?;
        self.write(&state)?;
        Ok(result)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded value is unit; a panic elsewhere leaves nothing to repair.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read(&self) -> Result<SessionState, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No session file at {}, using empty state", self.path.display());
                return Ok(SessionState::new(self.host.clone(), self.cutoff_hour));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let state: SessionState = serde_json::from_str(&raw)?;
        if state.cutoff_hour > 23 {
            return Err(StoreError::InvalidCutoff(state.cutoff_hour));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = state.players.iter().find(|p| !seen.insert(normalize_name(&p.name))) {
            return Err(StoreError::DuplicatePlayer(dup.name.clone()));
        }
        Ok(state)
    }

    fn write(&self, state: &SessionState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        log::debug!(
            "Saved session to {} ({} players)",
            self.path.display(),
            state.players.len()
        );
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::store::types::{Player, PlayerStatus, Profile, SkillLevel};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn player(name: &str) -> Player {
        Player {
            name: name.to_string(),
            status: PlayerStatus::In,
            joined_at: chrono::NaiveDateTime::default(),
            points: 0,
            skill_level: SkillLevel::Beginner,
            profile: Profile::default(),
        }
    }

    #[test]
    fn missing_file_loads_configured_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("data.json"), "Hamza", 19);

        let state = store.load().unwrap();
        assert_eq!(state.host, "Hamza");
        assert_eq!(state.cutoff_hour, 19);
        assert!(state.players.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_load_keeps_document() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested/data.json"), "Coordinator", 17);

        let mut state = store.load().unwrap();
        state.players.push(player("Ali"));
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), state);
        assert!(!dir.path().join("nested/data.json.tmp").exists());
    }

    #[test]
    fn failed_update_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("data.json"), "Coordinator", 17);

        let result: Result<(), ApiError> = store.update(|state| {
            state.players.push(player("Ali"));
            Err(ApiError::not_found("nope"))
        });

        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"players\": 3}").unwrap();

        let store = SessionStore::new(path, "Coordinator", 17);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn out_of_range_cutoff_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"cutoffHour\": 25}").unwrap();

        let store = SessionStore::new(path, "Coordinator", 17);
        assert!(matches!(store.load(), Err(StoreError::InvalidCutoff(25))));
    }

    #[test]
    fn duplicate_player_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let doc = serde_json::json!({
            "players": [
                {"name": "Ali", "status": "in", "joinedAt": "2025-01-05T17:02:11"},
                {"name": " ali ", "status": "out", "joinedAt": "2025-01-05T17:04:00"}
            ]
        });
        fs::write(&path, doc.to_string()).unwrap();

        let store = SessionStore::new(path, "Coordinator", 17);
        match store.load() {
            Err(StoreError::DuplicatePlayer(name)) => assert_eq!(name, " ali "),
            other => panic!("expected duplicate error, got {:?}", other),
        }
        // Updates refuse the document too, and leave it as it was
        let result = store.update(|_| Ok::<_, StoreError>(()));
        assert!(matches!(result, Err(StoreError::DuplicatePlayer(_))));
    }

    #[test]
    fn init_creates_default_file_once() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("data.json"), "Hamza", 18);

        assert!(store.init().unwrap());
        let state = store.load().unwrap();
        assert_eq!(state.host, "Hamza");
        assert_eq!(state.cutoff_hour, 18);

        store
            .update(|state| {
                state.players.push(player("Ali"));
                Ok::<_, StoreError>(())
            })
            .unwrap();
        assert!(!store.init().unwrap());
        assert_eq!(store.load().unwrap().players.len(), 1);
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().join("data.json"), "Coordinator", 17));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .update(|state| {
                            state.players.push(player(&format!("player{}", i)));
                            Ok::<_, StoreError>(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load().unwrap().players.len(), 8);
    }
}
