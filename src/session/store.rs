//! Persistent key-value storage behind the two session slots.
//!
//! Everything above this layer talks to a [`SessionStore`], so the classifier,
//! conflict detector and logout dispatcher run the same against the on-disk
//! [`FileStore`] used by the CLI and the [`MemoryStore`] used in tests.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SessionError;

/// Named-key string storage, modelled on browser local storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Single JSON object file of string keys to string values.
///
/// The file is re-read on every call; another process may have changed it
/// since the last one. Last write wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries: BTreeMap<String, String> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    // A corrupt file is discarded rather than blocking writes forever.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match self.load() {
            Ok(entries) => Ok(entries),
            Err(SessionError::Serialization(e)) => {
                tracing::warn!(
                    "Discarding unreadable session store {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self
            .path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));
        fs::write(&tmp, content)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(SessionError::Serialization(e)) => {
                tracing::warn!(
                    "Resetting unreadable session store {}: {}",
                    self.path.display(),
                    e
                );
                return self.save(&BTreeMap::new());
            }
            Err(e) => return Err(e),
        };

        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}
