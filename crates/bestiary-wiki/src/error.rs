//! Wiki client error types

use thiserror::Error;

/// Errors that can occur while talking to the wiki or entity mirrors
#[derive(Error, Debug)]
pub enum WikiError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status
    #[error("HTTP {status} for {url}")]
    Http {
        /// Status code returned
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body was not what the API promises
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Whitelist could not be read or parsed
    #[error("Whitelist error: {0}")]
    Whitelist(String),

    /// Invalid client settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WikiError {
    /// Whether retrying the request could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            WikiError::Communication(_) => true,
            WikiError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for wiki operations
pub type Result<T> = std::result::Result<T, WikiError>;
