//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Normalization error
    #[error(transparent)]
    Normalizer(#[from] bestiary_normalizer::NormalizerError),

    /// Wiki or mirror error
    #[error(transparent)]
    Wiki(#[from] bestiary_wiki::WikiError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Whitelisted entities could not be fetched
    #[error("Missing {count} {kind} IDs: {ids}")]
    MissingEntities {
        /// Plural entity label
        kind: &'static str,
        /// Number of missing IDs
        count: usize,
        /// Comma-separated missing IDs
        ids: String,
    },
}

impl CliError {
    /// Build a missing-entities error from the missing IDs
    pub fn missing(kind: &'static str, ids: &[u32]) -> Self {
        CliError::MissingEntities {
            kind,
            count: ids.len(),
            ids: ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
