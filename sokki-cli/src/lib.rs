//! Sokki CLI library
//!
//! This library provides the command-line interface for the Sokki
//! shorthand expansion engine.

pub mod commands;
pub mod error;
pub mod output;
pub mod script;
pub mod session;
pub mod store;

pub use error::{CliError, CliResult};
