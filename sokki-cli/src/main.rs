//! Command-line interface for the Sokki shorthand expansion engine

use clap::Parser;

use sokki_cli::commands::Commands;

/// Replay typing sessions through the expansion engine and manage its
/// rule profiles.
#[derive(Debug, Parser)]
#[command(name = "sokki", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
