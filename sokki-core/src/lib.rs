//! Replacement decision engine for live shorthand expansion
//!
//! This crate implements the decision half of a text expander: given the
//! text of an editing surface, the cursor position, the active rule set,
//! and a history of past corrections, it decides whether the word just
//! typed should be rewritten, what to rewrite it to, and how to undo that
//! rewrite when the user pushes back. It owns no UI and no persistence;
//! hosts feed it events and apply the edits it hands back.
//!
//! # Architecture
//!
//! - **API layer**: the [`ExpansionEngine`] facade, its configuration, and
//!   the decision/outcome types it answers with
//! - **Domain layer**: word segmentation, edit-distance similarity, the
//!   ordered matching pipeline, suggestion learning, and reversal
//! - **Store layer**: the [`RuleStore`] and [`HistoryStore`] contracts the
//!   host implements, plus in-memory implementations
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sokki_core::store::memory::{MemoryHistoryStore, MemoryRuleStore};
//! use sokki_core::ExpansionEngine;
//!
//! let rules = Arc::new(MemoryRuleStore::with_defaults());
//! let history = Arc::new(MemoryHistoryStore::new());
//! let mut engine = ExpansionEngine::new(rules, history);
//!
//! // "ty" just finished in front of the cursor; the stock rule expands it.
//! let outcome = engine.handle_text_change("hi ty", 5);
//! let edit = outcome.edit.expect("rule should apply");
//! assert_eq!(edit.text, "hi thank you");
//! assert_eq!(edit.cursor, 12);
//! ```

pub mod api;
pub mod domain;
pub mod store;

pub use api::{
    defaults, Config, ConfigBuilder, ControlKey, Decision, Error, ExpansionEngine, MatchSource,
    Outcome, PromotionPrompt, Result, TextEdit,
};
pub use store::{
    ChangeFlag, HistoryStore, Profile, ProfileSet, Rule, RuleStore, StoreError,
    DEFAULT_PROFILE_ID,
};
