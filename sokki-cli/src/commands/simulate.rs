//! Simulate command implementation

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use sokki_core::{Config, ExpansionEngine};

use crate::error::{CliError, CliResult};
use crate::output;
use crate::script;
use crate::session::Session;
use crate::store::{JsonHistoryStore, JsonProfileStore};

/// Arguments for the simulate command
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Key script to replay ('-' reads standard input, '@FILE' reads a file)
    #[arg(value_name = "SCRIPT")]
    pub script: String,

    /// Profile store file
    #[arg(long, value_name = "FILE", default_value = "profiles.json")]
    pub rules: PathBuf,

    /// History store file
    #[arg(long, value_name = "FILE", default_value = "history.json")]
    pub history: PathBuf,

    /// Accept promotion prompts as soon as they appear
    #[arg(long)]
    pub auto_accept: bool,

    /// Replay the script with replacements switched off
    #[arg(long)]
    pub disabled: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    /// Event log followed by the final surface state
    Text,
    /// Full session report as JSON
    Json,
}

impl SimulateArgs {
    /// Execute the simulate command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging()?;

        let source = self.read_script()?;
        let steps = script::parse_script(&source)?;
        log::info!("Replaying {} script steps", steps.len());

        let rules = Arc::new(JsonProfileStore::open(&self.rules)?);
        let history = Arc::new(JsonHistoryStore::open(&self.history)?);
        log::debug!("Active profile: {}", rules.active_id());

        let config = Config::builder().enabled(!self.disabled).build()?;
        let engine = ExpansionEngine::with_config(config, rules.clone(), history);

        let mut session = Session::new(engine, rules).auto_accept(self.auto_accept);
        session.run(&steps);
        let report = session.into_report();

        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        match self.format {
            ReportFormat::Text => output::render_text(&report, &mut lock),
            ReportFormat::Json => output::render_json(&report, &mut lock),
        }
    }

    fn read_script(&self) -> CliResult<String> {
        if self.script == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read script from stdin")?;
            return Ok(buffer);
        }

        if let Some(path) = self.script.strip_prefix('@') {
            let source = std::fs::read_to_string(path)
                .map_err(|_| CliError::ScriptNotFound(path.to_string()))?;
            return Ok(source);
        }

        Ok(self.script.clone())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> CliResult<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }

        Ok(())
    }
}
