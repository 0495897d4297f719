use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a trip can surface.
///
/// The builder itself never fails; errors come from constructing a
/// connection, talking to the executor, or validating what it returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Missing or unusable credentials. Raised at construction, never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(
        "missing an LSD user, specify [user] in the configuration object, set the [LSD_USER] environment variable or add it to {config_file}"
    )]
    MissingUser { config_file: String },

    #[error(
        "missing an LSD password, specify [password] in the configuration object, set the [LSD_PASSWORD] environment variable or add it to {config_file}"
    )]
    MissingPassword { config_file: String },

    #[error("could not read config file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },
}

/// The executor handle could not be acquired or was lost.
#[derive(Debug, Error)]
#[error("could not reach {host}: {message}")]
pub struct ConnectivityError {
    pub host: String,
    pub message: String,
}

/// The remote interpreter rejected or failed the program.
#[derive(Debug, Error)]
#[error("query failed: {message}")]
pub struct ExecutionError {
    pub message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        ExecutionError {
            message: message.into(),
        }
    }
}

/// Returned rows do not conform to the declared schema.
///
/// Only the first mismatch is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed at {path}: expected {expected}, got {actual}")]
pub struct ValidationError {
    /// Location of the offending value, e.g. `$[0].post`
    pub path: String,
    pub expected: String,
    pub actual: String,
}
