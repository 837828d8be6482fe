//! Error types for the public API.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced while constructing or configuring an engine.
///
/// Event handling itself never returns an error: a malformed event is
/// answered with a no-action outcome so a host bug can never wedge typing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for the public API.
pub type Result<T> = std::result::Result<T, Error>;
