//! Small persisted key/value state.
//!
//! Values live as JSON in `state.json` next to the config file. Reads never
//! fail: a missing file, a missing key, or a value that no longer matches
//! the expected type all fall back to the caller's initial value.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use super::LocalConfig;

const STATE_FILE: &str = "state.json";

/// Key used by `compare` to remember the last package list.
pub const LAST_PACKAGES_KEY: &str = "last_packages";

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the default config directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(LocalConfig::config_dir()?.join(STATE_FILE)))
    }

    /// Read `key`, or `initial` if it is absent or unreadable.
    pub fn load<T: DeserializeOwned>(&self, key: &str, initial: T) -> T {
        let Some(value) = self.read_all().remove(key) else {
            return initial;
        };

        match serde_json::from_value(value) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(key, error = %e, "ignoring stored state with unexpected shape");
                initial
            }
        }
    }

    /// Persist `value` under `key`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut entries = self.read_all();
        entries.insert(
            key.to_string(),
            serde_json::to_value(value).context("Failed to serialize state")?,
        );

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(entries))
            .context("Failed to serialize state")?;
        std::fs::write(&self.path, content).context("Failed to write state file")
    }

    /// Apply `f` to the current value of `key` and persist the result.
    pub fn update<T, F>(&self, key: &str, initial: T, f: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T,
    {
        let next = f(self.load(key, initial));
        self.set(key, &next)?;
        Ok(next)
    }

    fn read_all(&self) -> Map<String, Value> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "state file is not a JSON object, starting fresh");
                Map::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, StateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(state_path(&dir));
        (dir, store)
    }

    fn state_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("state").join(STATE_FILE)
    }

    #[test]
    fn test_load_missing_returns_initial() {
        let (_dir, store) = store();
        let value: Vec<String> = store.load(LAST_PACKAGES_KEY, vec!["react".to_string()]);
        assert_eq!(value, ["react"]);
    }

    #[test]
    fn test_set_then_load() {
        let (_dir, store) = store();
        store
            .set(LAST_PACKAGES_KEY, &vec!["vue", "svelte"])
            .unwrap();

        let value: Vec<String> = store.load(LAST_PACKAGES_KEY, Vec::new());
        assert_eq!(value, ["vue", "svelte"]);
    }

    #[test]
    fn test_keys_are_independent() {
        let (_dir, store) = store();
        store.set("a", &1u32).unwrap();
        store.set("b", &"two").unwrap();

        assert_eq!(store.load("a", 0u32), 1);
        assert_eq!(store.load("b", String::new()), "two");
    }

    #[test]
    fn test_update_applies_function() {
        let (_dir, store) = store();
        let first = store.update("count", 0u32, |n| n + 1).unwrap();
        let second = store.update("count", 0u32, |n| n + 1).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.load("count", 0u32), 2);
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        let (_dir, store) = store();
        store.set(LAST_PACKAGES_KEY, &"not a list").unwrap();

        let value: Vec<String> = store.load(LAST_PACKAGES_KEY, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_replaced_on_write() {
        let (dir, store) = store();
        let path = state_path(&dir);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(store.load("k", 7u32), 7);
        store.set("k", &9u32).unwrap();
        assert_eq!(store.load("k", 7u32), 9);
    }
}
