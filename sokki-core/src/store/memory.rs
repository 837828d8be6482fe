//! In-memory store implementations.
//!
//! These back the engine in tests and in hosts that manage persistence
//! elsewhere. Both are cheap to share behind an `Arc` and safe to mutate
//! from the host side while an engine holds the read side.

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{ChangeFlag, HistoryStore, Profile, ProfileSet, Rule, RuleStore, StoreError};

/// Profile-aware rule store backed by plain memory.
#[derive(Debug)]
pub struct MemoryRuleStore {
    state: RwLock<ProfileSet>,
    subscribers: RwLock<Vec<ChangeFlag>>,
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRuleStore {
    /// An empty store holding only a ruleless default profile.
    pub fn new() -> Self {
        Self::from_set(ProfileSet::empty())
    }

    /// A store seeded with the stock default rules.
    pub fn with_defaults() -> Self {
        Self::from_set(ProfileSet::seeded())
    }

    pub fn from_set(set: ProfileSet) -> Self {
        Self {
            state: RwLock::new(set),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn add_rule(&self, rule: Rule) {
        self.state.write().add_rule(rule);
        self.notify();
    }

    pub fn remove_rule(&self, pattern: &str) -> bool {
        let removed = self.state.write().remove_rule(pattern);
        if removed {
            self.notify();
        }
        removed
    }

    pub fn create_profile(&self, id: &str, name: &str) -> Result<(), StoreError> {
        self.state.write().create_profile(id, name)
    }

    pub fn delete_profile(&self, id: &str) -> Result<(), StoreError> {
        self.state.write().delete_profile(id)
    }

    pub fn set_active(&self, id: &str) -> Result<(), StoreError> {
        self.state.write().set_active(id)?;
        self.notify();
        Ok(())
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.state.read().profiles().to_vec()
    }

    pub fn active_id(&self) -> String {
        self.state.read().active_id().to_string()
    }

    fn notify(&self) {
        for flag in self.subscribers.read().iter() {
            flag.raise();
        }
    }
}

impl RuleStore for MemoryRuleStore {
    fn active_rules(&self) -> Vec<Rule> {
        self.state.read().active_rules()
    }

    fn subscribe(&self, flag: ChangeFlag) {
        self.subscribers.write().push(flag);
    }
}

/// Correction history held in insertion order.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: RwLock<IndexMap<String, String>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn snapshot(&self) -> IndexMap<String, String> {
        self.entries.read().clone()
    }

    fn put(&self, word: &str, final_form: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(word.to_string(), final_form.to_string());
        Ok(())
    }
}
