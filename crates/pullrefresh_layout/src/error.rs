//! Container error types

use std::path::PathBuf;

use thiserror::Error;

/// Setup-time errors for the pull container
///
/// Runtime input anomalies never surface here; they are logged and ignored.
#[derive(Error, Debug)]
pub enum PullError {
    /// More children than the three container roles
    #[error("pull container accepts at most 3 children, got {0}")]
    TooManyChildren(usize),

    /// No child carries the content role
    #[error("pull container requires a content child")]
    MissingContent,

    /// A role was assigned to two children
    #[error("duplicate {0} child")]
    DuplicateRole(&'static str),

    /// Configuration values out of range
    #[error("invalid pull config: {0}")]
    InvalidConfig(String),

    /// Failed to read a config file
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a config file
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for container setup operations
pub type Result<T> = std::result::Result<T, PullError>;
