//! Public API for the expansion engine
//!
//! This module provides the host-facing interface: the engine facade, its
//! configuration, and the decision and outcome types it answers events
//! with. Internal matching machinery stays in the domain layer.

mod config;
mod engine;
mod error;
mod input;
mod output;

#[cfg(test)]
mod tests;

pub use config::{defaults, Config, ConfigBuilder};
pub use engine::ExpansionEngine;
pub use error::{Error, Result};
pub use input::ControlKey;
pub use output::{Decision, MatchSource, Outcome, PromotionPrompt, TextEdit};
