//! Profiles command implementation

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::CliResult;
use crate::store::JsonProfileStore;

/// Arguments for the profiles command
#[derive(Debug, Args)]
pub struct ProfilesArgs {
    /// Profile store file
    #[arg(long, value_name = "FILE", default_value = "profiles.json")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles, marking the active one
    List,

    /// Create a new empty profile
    Create {
        /// Display name for the profile
        name: String,

        /// Profile identifier (derived from the name when omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Identifier of the profile to delete
        id: String,
    },

    /// Switch the active profile
    Use {
        /// Identifier of the profile to activate
        id: String,
    },
}

impl ProfilesArgs {
    /// Execute the profiles command
    pub fn execute(&self) -> CliResult<()> {
        let store = JsonProfileStore::open(&self.store)?;

        match &self.action {
            ProfileAction::List => {
                let active = store.active_id();
                for profile in store.profiles() {
                    let marker = if profile.id == active { "*" } else { " " };
                    println!(
                        "{marker} {} [{}] ({} rules)",
                        profile.name,
                        profile.id,
                        profile.rules.len()
                    );
                }
            }
            ProfileAction::Create { name, id } => {
                let id = match id {
                    Some(id) => id.clone(),
                    None => slug(name),
                };
                store.create_profile(&id, name)?;
                println!("Created profile: {name} [{id}]");
            }
            ProfileAction::Delete { id } => {
                store.delete_profile(id)?;
                println!("Deleted profile: {id}");
            }
            ProfileAction::Use { id } => {
                store.set_active(id)?;
                println!("Active profile: {id}");
            }
        }

        Ok(())
    }
}

/// Derive a profile identifier from its display name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
