//! CLI command implementations

use clap::Subcommand;

use crate::error::CliResult;

pub mod profiles;
pub mod rules;
pub mod simulate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a key script through the expansion engine
    Simulate(simulate::SimulateArgs),

    /// Manage replacement rules in the active profile
    Rules(rules::RulesArgs),

    /// Manage rule profiles
    Profiles(profiles::ProfilesArgs),
}

impl Commands {
    /// Run the selected command.
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Simulate(args) => args.execute(),
            Commands::Rules(args) => args.execute(),
            Commands::Profiles(args) => args.execute(),
        }
    }
}
