//! Rules command implementation

use std::path::PathBuf;

use clap::{Args, Subcommand};

use sokki_core::Rule;

use crate::error::CliResult;
use crate::store::JsonProfileStore;

/// Arguments for the rules command
#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Profile store file
    #[arg(long, value_name = "FILE", default_value = "profiles.json")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub action: RuleAction,
}

/// Rule management subcommands
#[derive(Debug, Subcommand)]
pub enum RuleAction {
    /// List the rules in the active profile
    List,

    /// Add a rule to the active profile, overwriting any rule with the
    /// same pattern
    Add {
        /// Shorthand to expand
        pattern: String,
        /// Replacement text
        replacement: String,
    },

    /// Remove a rule from the active profile
    Remove {
        /// Shorthand of the rule to remove
        pattern: String,
    },
}

impl RulesArgs {
    /// Execute the rules command
    pub fn execute(&self) -> CliResult<()> {
        let store = JsonProfileStore::open(&self.store)?;

        match &self.action {
            RuleAction::List => {
                let profile = store.active_profile();
                println!("Profile: {} [{}]", profile.name, profile.id);
                if profile.rules.is_empty() {
                    println!("  (no rules)");
                }
                for rule in &profile.rules {
                    println!("  {} -> {}", rule.pattern, rule.replacement);
                }
            }
            RuleAction::Add {
                pattern,
                replacement,
            } => {
                store.add_rule(Rule::new(pattern, replacement))?;
                println!("Added: {pattern} -> {replacement}");
            }
            RuleAction::Remove { pattern } => {
                if store.remove_rule(pattern)? {
                    println!("Removed: {pattern}");
                } else {
                    println!("No rule for: {pattern}");
                }
            }
        }

        Ok(())
    }
}
