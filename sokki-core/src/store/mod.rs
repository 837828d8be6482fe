//! Store contracts for rules, profiles, and correction history.
//!
//! The engine never owns persistence. It reads an ordered snapshot of the
//! active rules through [`RuleStore`], reads and appends correction history
//! through [`HistoryStore`], and leaves the question of where that data
//! actually lives to the host. In-memory implementations suitable for tests
//! and for embedding live in [`memory`].

pub mod memory;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the profile that always exists and cannot be deleted.
pub const DEFAULT_PROFILE_ID: &str = "default";

/// A user-authored shorthand: typing `pattern` as a whole word rewrites it
/// to `replacement`.
///
/// Patterns are matched case-sensitively and are unique within a profile;
/// adding a rule with an existing pattern overwrites the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// A named set of rules. Exactly one profile is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// The profile seeded on first run, carrying the stock rules.
    pub fn default_profile() -> Self {
        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: "Default".to_string(),
            rules: vec![
                Rule::new("ty", "thank you"),
                Rule::new("pls", "please"),
                Rule::new("u", "you"),
                Rule::new("r", "are"),
            ],
        }
    }
}

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("unknown profile: {0}")]
    ProfileNotFound(String),

    #[error("profile '{0}' already exists")]
    ProfileExists(String),

    #[error("profile '{0}' cannot be deleted")]
    ProtectedProfile(String),

    #[error("profile '{0}' is active; switch profiles before deleting it")]
    ProfileActive(String),
}

/// Subscription token for rule-set change notifications.
///
/// Stores raise every subscribed flag when their active rule set mutates.
/// The engine drains its flag on the next event and re-derives its snapshot,
/// so notification delivery stays a single atomic store on the mutating side.
#[derive(Debug, Clone, Default)]
pub struct ChangeFlag(Arc<AtomicBool>);

impl ChangeFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Mark the subscribed state as stale.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Return whether the flag was raised, lowering it in the same step.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Read side of rule storage, as seen by the engine.
pub trait RuleStore: Send + Sync {
    /// Ordered snapshot of the active profile's rules.
    fn active_rules(&self) -> Vec<Rule>;

    /// Register a flag to be raised whenever the active rule set changes,
    /// whether through rule edits or a profile switch.
    fn subscribe(&self, flag: ChangeFlag);
}

/// Correction history: what each observed word was last finalized as.
pub trait HistoryStore: Send + Sync {
    /// Snapshot of the whole mapping, in insertion order.
    fn snapshot(&self) -> IndexMap<String, String>;

    /// Record the finalized form of a word. Implementations may complete the
    /// write lazily; callers treat failures as non-fatal.
    fn put(&self, word: &str, final_form: &str) -> Result<(), StoreError>;
}

/// The profile collection plus the active selection, independent of where it
/// is persisted.
///
/// Store implementations wrap this in whatever locking and serialization
/// they need; the mutation rules (unique patterns, protected default
/// profile, no deleting the active profile) live here so every store
/// enforces them identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSet {
    #[serde(rename = "active_profile")]
    active_id: String,
    profiles: Vec<Profile>,
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ProfileSet {
    /// A fresh set holding only the stock default profile.
    pub fn seeded() -> Self {
        Self {
            active_id: DEFAULT_PROFILE_ID.to_string(),
            profiles: vec![Profile::default_profile()],
        }
    }

    /// A set holding only a ruleless default profile.
    pub fn empty() -> Self {
        Self {
            active_id: DEFAULT_PROFILE_ID.to_string(),
            profiles: vec![Profile::new(DEFAULT_PROFILE_ID, "Default")],
        }
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == self.active_id)
    }

    /// Rules of the active profile, in authoring order.
    pub fn active_rules(&self) -> Vec<Rule> {
        self.active_profile()
            .map(|p| p.rules.clone())
            .unwrap_or_default()
    }

    /// Add `rule` to the active profile, overwriting any rule that already
    /// uses the same pattern.
    pub fn add_rule(&mut self, rule: Rule) {
        if let Some(profile) = self.active_profile_mut() {
            match profile.rules.iter_mut().find(|r| r.pattern == rule.pattern) {
                Some(existing) => existing.replacement = rule.replacement,
                None => profile.rules.push(rule),
            }
        }
    }

    /// Remove the active profile's rule matching `pattern`. Returns whether
    /// anything was removed.
    pub fn remove_rule(&mut self, pattern: &str) -> bool {
        match self.active_profile_mut() {
            Some(profile) => {
                let before = profile.rules.len();
                profile.rules.retain(|r| r.pattern != pattern);
                profile.rules.len() != before
            }
            None => false,
        }
    }

    pub fn create_profile(&mut self, id: &str, name: &str) -> Result<(), StoreError> {
        if self.profiles.iter().any(|p| p.id == id) {
            return Err(StoreError::ProfileExists(id.to_string()));
        }
        self.profiles.push(Profile::new(id, name));
        Ok(())
    }

    pub fn delete_profile(&mut self, id: &str) -> Result<(), StoreError> {
        if id == DEFAULT_PROFILE_ID {
            return Err(StoreError::ProtectedProfile(id.to_string()));
        }
        if id == self.active_id {
            return Err(StoreError::ProfileActive(id.to_string()));
        }
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != id);
        if self.profiles.len() == before {
            return Err(StoreError::ProfileNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.profiles.iter().any(|p| p.id == id) {
            return Err(StoreError::ProfileNotFound(id.to_string()));
        }
        self.active_id = id.to_string();
        Ok(())
    }

    fn active_profile_mut(&mut self) -> Option<&mut Profile> {
        let id = self.active_id.clone();
        self.profiles.iter_mut().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_set_has_stock_rules() {
        let set = ProfileSet::seeded();
        assert_eq!(set.active_id(), DEFAULT_PROFILE_ID);
        let rules = set.active_rules();
        assert!(rules.contains(&Rule::new("ty", "thank you")));
        assert!(rules.contains(&Rule::new("pls", "please")));
        assert_eq!(rules.len(), 4);
    }

    #[test]
    fn test_add_rule_overwrites_same_pattern() {
        let mut set = ProfileSet::seeded();
        set.add_rule(Rule::new("ty", "thanks"));
        let rules = set.active_rules();
        assert_eq!(rules.len(), 4, "overwrite must not grow the rule list");
        let ty = rules.iter().find(|r| r.pattern == "ty").unwrap();
        assert_eq!(ty.replacement, "thanks");
    }

    #[test]
    fn test_add_rule_preserves_order() {
        let mut set = ProfileSet::seeded();
        set.add_rule(Rule::new("omg", "oh my god"));
        let rules = set.active_rules();
        assert_eq!(rules.first().unwrap().pattern, "ty");
        assert_eq!(rules.last().unwrap().pattern, "omg");
    }

    #[test]
    fn test_remove_rule() {
        let mut set = ProfileSet::seeded();
        assert!(set.remove_rule("ty"));
        assert!(!set.remove_rule("ty"), "second removal finds nothing");
        assert_eq!(set.active_rules().len(), 3);
    }

    #[test]
    fn test_default_profile_cannot_be_deleted() {
        let mut set = ProfileSet::seeded();
        let err = set.delete_profile(DEFAULT_PROFILE_ID).unwrap_err();
        assert!(matches!(err, StoreError::ProtectedProfile(_)));
    }

    #[test]
    fn test_active_profile_cannot_be_deleted() {
        let mut set = ProfileSet::seeded();
        set.create_profile("work", "Work").unwrap();
        set.set_active("work").unwrap();
        let err = set.delete_profile("work").unwrap_err();
        assert!(matches!(err, StoreError::ProfileActive(_)));
    }

    #[test]
    fn test_profile_lifecycle() {
        let mut set = ProfileSet::seeded();
        set.create_profile("work", "Work").unwrap();
        set.set_active("work").unwrap();
        assert!(set.active_rules().is_empty(), "new profiles start empty");

        set.add_rule(Rule::new("wfh", "working from home"));
        assert_eq!(set.active_rules().len(), 1);

        set.set_active(DEFAULT_PROFILE_ID).unwrap();
        assert_eq!(set.active_rules().len(), 4, "default profile untouched");

        set.delete_profile("work").unwrap();
        assert!(matches!(
            set.set_active("work"),
            Err(StoreError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_profile_id_rejected() {
        let mut set = ProfileSet::seeded();
        set.create_profile("work", "Work").unwrap();
        assert!(matches!(
            set.create_profile("work", "Other"),
            Err(StoreError::ProfileExists(_))
        ));
    }

    #[test]
    fn test_change_flag_take_lowers() {
        let flag = ChangeFlag::new();
        assert!(!flag.take());
        flag.raise();
        assert!(flag.is_raised());
        assert!(flag.take());
        assert!(!flag.take(), "take drains the flag");
    }

    #[test]
    fn test_profile_set_serde_round_trip() {
        let mut set = ProfileSet::seeded();
        set.create_profile("work", "Work").unwrap();
        set.add_rule(Rule::new("omg", "oh my god"));

        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"active_profile\":\"default\""));
        let back: ProfileSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
