//! Error types for the plugin operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the plugin operations
///
/// Every variant is converted to a single line on the host's error sink at
/// the operation boundary; nothing here ever propagates as a panic to the
/// host. An unrecognized submission response is not an error, it is a
/// diagnostic outcome (see `SubmissionOutcome::Unrecognized`).
#[derive(Error, Debug)]
pub enum PluginError {
    /// Working directory does not look like `.../aoc<year>/day<day>`
    #[error("not an advent of code directory (expected .../aoc<year>/day<day>): {}", path.display())]
    InvalidContext { path: PathBuf },

    /// No session cookie stored; checked before any network call
    #[error("no session cookie set; set one first")]
    MissingCredential,

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_client::ClientError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
