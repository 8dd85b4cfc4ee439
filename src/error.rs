/// Centralized error types for repograph using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the dependency-graph engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not a valid repository URL: '{0}' (expected <host>/<owner>/<repo>)")]
    InvalidRepoUrl(String),

    #[error("Remote host returned status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Content unavailable for file: {0}")]
    ContentUnavailable(String),

    #[error("No supported files found in repository")]
    NoSupportedFiles,

    #[error("No file with index {0} in the current scan")]
    UnknownFile(usize),

    #[error("No repository has been scanned yet")]
    NoActiveScan,

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

/// Errors related to configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl Error {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a user error (bad input, empty repo) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::InvalidRepoUrl(_) | Error::NoSupportedFiles)
    }

    /// Check if repeating the same operation could succeed
    ///
    /// The engine never retries on its own; this drives the caller's
    /// "try again" affordance.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Remote { .. } | Error::ContentUnavailable(_) | Error::Http(_)
        )
    }
}
