//! Key-value persistence for engine state
//!
//! State is stored as one JSON file per key under the data directory.
//! Unreadable or corrupt values are treated as absent so a damaged store
//! degrades to empty defaults instead of failing the command. Points and
//! streak are persisted only as display snapshots; on load they are
//! recomputed from the task list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use ember_core::{BadgeSet, Engine, TaskStore};

use crate::error::{CliError, Result};

pub const KEY_TASKS: &str = "tasks";
pub const KEY_POINTS: &str = "points";
pub const KEY_STREAK: &str = "streak";
pub const KEY_BADGES: &str = "badges";
pub const KEY_QUOTE: &str = "quote";

/// Opaque key-value persistence contract
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// One JSON file per key under a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store's root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn backup_path(&self) -> PathBuf {
        self.dir.join(format!("{KEY_TASKS}.json.bak"))
    }

    /// Check if a tasks backup exists
    pub fn backup_exists(&self) -> bool {
        self.backup_path().exists()
    }

    /// Copy the current tasks file aside before overwriting it
    fn backup_tasks(&self) -> Result<()> {
        let path = self.key_path(KEY_TASKS);
        if !path.exists() {
            return Ok(());
        }
        fs::copy(&path, self.backup_path())
            .map_err(|e| CliError::io("Failed to back up tasks", e))?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)
            .map_err(|e| CliError::io(format!("Failed to read {}", path.display()), e))?;
        Ok(Some(bytes))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| CliError::io(format!("Failed to create {}", self.dir.display()), e))?;
        let path = self.key_path(key);
        fs::write(&path, value)
            .map_err(|e| CliError::io(format!("Failed to write {}", path.display()), e))?;
        Ok(())
    }
}

/// Read a key, treating a read failure as an absent value
fn get_soft(store: &impl KvStore, key: &str) -> Option<Vec<u8>> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Warning: could not read '{key}' state: {e}");
            None
        }
    }
}

/// Decode a JSON value, treating corrupt data as absent
fn decode_or_default<T: Default + DeserializeOwned>(key: &str, bytes: Option<Vec<u8>>) -> T {
    let Some(bytes) = bytes else {
        return T::default();
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Warning: ignoring corrupt '{key}' state: {e}");
            T::default()
        }
    }
}

/// Restore the engine from the store.
///
/// Absent, unreadable, or corrupt keys fall back to empty defaults.
/// Metrics are recomputed from the task list rather than read back.
pub fn load_engine(store: &impl KvStore) -> Engine {
    let mut tasks: TaskStore = decode_or_default(KEY_TASKS, get_soft(store, KEY_TASKS));
    tasks.normalize_ids();
    let badges: BadgeSet = decode_or_default(KEY_BADGES, get_soft(store, KEY_BADGES));
    Engine::from_snapshot(tasks, badges)
}

/// Persist the full engine snapshot.
///
/// A failure is returned to the caller to surface as a non-fatal
/// warning; in-memory state stays authoritative for the session.
pub fn save_engine(store: &FileStore, engine: &Engine) -> Result<()> {
    store.backup_tasks()?;

    store.set(KEY_TASKS, &serde_json::to_vec_pretty(engine.store())?)?;
    let metrics = engine.metrics();
    store.set(KEY_POINTS, metrics.points.to_string().as_bytes())?;
    store.set(KEY_STREAK, metrics.streak.to_string().as_bytes())?;
    store.set(KEY_BADGES, &serde_json::to_vec(engine.badges())?)?;
    Ok(())
}

/// Restore the task list from the backup file
pub fn recover_tasks(store: &FileStore) -> Result<TaskStore> {
    let path = store.backup_path();
    if !path.exists() {
        return Err(CliError::storage("Backup file not found"));
    }

    let bytes =
        fs::read(&path).map_err(|e| CliError::io("Failed to read tasks backup", e))?;
    let mut tasks: TaskStore = serde_json::from_slice(&bytes)
        .map_err(|e| CliError::storage_with_source("Tasks backup is unreadable", e))?;
    tasks.normalize_ids();
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Intent;

    fn temp_store(name: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("ember-store-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        FileStore::new(dir)
    }

    fn engine_with_completed(count: usize, completed: usize) -> Engine {
        let mut engine = Engine::new();
        for i in 0..count {
            engine
                .apply(Intent::AddTask {
                    text: format!("task {}", i + 1),
                })
                .unwrap();
        }
        for index in 0..completed {
            engine.apply(Intent::ToggleTask { index }).unwrap();
        }
        engine
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let store = temp_store("missing");
        assert!(store.get("tasks").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let store = temp_store("roundtrip");

        store.set("tasks", b"[1,2,3]").unwrap();
        assert_eq!(store.get("tasks").unwrap().unwrap(), b"[1,2,3]");

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_load_from_empty_dir_gives_empty_engine() {
        let store = temp_store("empty");
        let engine = load_engine(&store);

        assert!(engine.store().is_empty());
        assert!(engine.badges().is_empty());
        assert_eq!(engine.metrics().points, 0);
    }

    #[test]
    fn test_save_then_load_restores_state() {
        let store = temp_store("save-load");
        let engine = engine_with_completed(5, 5);
        assert!(engine.badges().contains(5));

        save_engine(&store, &engine).unwrap();
        let restored = load_engine(&store);

        assert_eq!(restored.store().tasks(), engine.store().tasks());
        assert_eq!(restored.badges(), engine.badges());
        assert_eq!(restored.metrics().points, 50);
        assert_eq!(restored.metrics().streak, 5);

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_corrupt_tasks_degrade_to_empty() {
        let store = temp_store("corrupt");
        store.set(KEY_TASKS, b"{not json").unwrap();

        let engine = load_engine(&store);
        assert!(engine.store().is_empty());

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_backup_holds_previous_snapshot() {
        let store = temp_store("backup");

        let first = engine_with_completed(1, 0);
        save_engine(&store, &first).unwrap();
        assert!(!store.backup_exists());

        let second = engine_with_completed(2, 0);
        save_engine(&store, &second).unwrap();
        assert!(store.backup_exists());

        let recovered = recover_tasks(&store).unwrap();
        assert_eq!(recovered.tasks(), first.store().tasks());

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn test_recover_without_backup_is_an_error() {
        let store = temp_store("no-backup");
        assert!(recover_tasks(&store).is_err());
    }
}
