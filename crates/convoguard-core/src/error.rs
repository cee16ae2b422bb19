//! Error types for the governor crate

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the fallible edges of the governor: loading configuration
/// and decoding transcripts. The trimming and failover algorithms themselves
/// never fail.
#[derive(Error, Debug)]
pub enum GovernorError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid transcript: {0}")]
    Transcript(#[from] serde_json::Error),
}

/// Errors from driving a model call through profile failover.
#[derive(Error, Debug)]
pub enum FailoverError<E> {
    #[error("No model profiles configured")]
    NoProfiles,

    #[error("Cancelled while retrying profile {profile}")]
    Cancelled { profile: String },

    #[error("All {attempted} profiles failed, last error: {last_error}")]
    Exhausted { attempted: usize, last_error: E },
}

/// Result type alias for governor operations
pub type Result<T> = std::result::Result<T, GovernorError>;
