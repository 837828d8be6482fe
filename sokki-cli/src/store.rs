//! JSON-file-backed rule and history stores.
//!
//! These give the engine the same two collaborators a real host would wire
//! in: profiles (with the active selection) in one file, correction history
//! in another. Writes go through a temp file in the target directory plus
//! an atomic rename, so an interrupted run never leaves a half-written
//! store behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use tempfile::NamedTempFile;

use sokki_core::{
    ChangeFlag, HistoryStore, Profile, ProfileSet, Rule, RuleStore, StoreError,
};

/// Write side of rule storage, used when a promotion prompt is accepted.
pub trait RuleSink: Send + Sync {
    fn accept_rule(&self, rule: Rule) -> Result<(), StoreError>;
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// Profile store persisted as a single JSON document.
#[derive(Debug)]
pub struct JsonProfileStore {
    path: PathBuf,
    state: RwLock<ProfileSet>,
    subscribers: RwLock<Vec<ChangeFlag>>,
}

impl JsonProfileStore {
    /// Open the store at `path`, seeding the stock default profile (and
    /// writing the file) when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            let set: ProfileSet = serde_json::from_str(&json)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            if !set.profiles().iter().any(|p| p.id == set.active_id()) {
                return Err(StoreError::ProfileNotFound(set.active_id().to_string()));
            }
            set
        } else {
            let set = ProfileSet::seeded();
            write_json(&path, &set)?;
            set
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
            subscribers: RwLock::new(Vec::new()),
        })
    }

    pub fn add_rule(&self, rule: Rule) -> Result<(), StoreError> {
        {
            let mut state = self.state.write();
            state.add_rule(rule);
            write_json(&self.path, &*state)?;
        }
        self.notify();
        Ok(())
    }

    pub fn remove_rule(&self, pattern: &str) -> Result<bool, StoreError> {
        let removed = {
            let mut state = self.state.write();
            let removed = state.remove_rule(pattern);
            if removed {
                write_json(&self.path, &*state)?;
            }
            removed
        };
        if removed {
            self.notify();
        }
        Ok(removed)
    }

    pub fn create_profile(&self, id: &str, name: &str) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.create_profile(id, name)?;
        write_json(&self.path, &*state)
    }

    pub fn delete_profile(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.delete_profile(id)?;
        write_json(&self.path, &*state)
    }

    pub fn set_active(&self, id: &str) -> Result<(), StoreError> {
        {
            let mut state = self.state.write();
            state.set_active(id)?;
            write_json(&self.path, &*state)?;
        }
        self.notify();
        Ok(())
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.state.read().profiles().to_vec()
    }

    pub fn active_id(&self) -> String {
        self.state.read().active_id().to_string()
    }

    /// The active profile. `open` validates the active id, so the fallback
    /// only shows up if the file was edited behind our back.
    pub fn active_profile(&self) -> Profile {
        let state = self.state.read();
        state
            .active_profile()
            .cloned()
            .unwrap_or_else(|| Profile::new(state.active_id(), state.active_id()))
    }

    fn notify(&self) {
        for flag in self.subscribers.read().iter() {
            flag.raise();
        }
    }
}

impl RuleStore for JsonProfileStore {
    fn active_rules(&self) -> Vec<Rule> {
        self.state.read().active_rules()
    }

    fn subscribe(&self, flag: ChangeFlag) {
        self.subscribers.write().push(flag);
    }
}

impl RuleSink for JsonProfileStore {
    fn accept_rule(&self, rule: Rule) -> Result<(), StoreError> {
        self.add_rule(rule)
    }
}

/// Correction history persisted as a JSON object, preserving entry order.
pub struct JsonHistoryStore {
    path: PathBuf,
    entries: RwLock<IndexMap<String, String>>,
}

impl JsonHistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str(&json).map_err(|e| StoreError::Serialization(e.to_string()))?
        } else {
            IndexMap::new()
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl HistoryStore for JsonHistoryStore {
    fn snapshot(&self) -> IndexMap<String, String> {
        self.entries.read().clone()
    }

    fn put(&self, word: &str, final_form: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        entries.insert(word.to_string(), final_form.to_string());
        write_json(&self.path, &*entries)
    }
}
