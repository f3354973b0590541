//! Normalizer configuration

use crate::NormalizerError;
use bestiary_domain::FilterMode;
use serde::{Deserialize, Serialize};

/// Default data source tag written into canonical output
pub const DEFAULT_SOURCE_TAG: &str = "osrs_wiki";

/// Entities excluded by exact page name
///
/// Discontinued, unreleased, or otherwise special entries of the upstream
/// wiki. Replaceable through configuration.
pub const DEFAULT_SKIP_NAMES: &[&str] = &[
    "Albatross",
    "Armoured kraken",
    "Bull shark",
    "Butterfly ray",
    "Eagle ray",
    "Frigatebird",
    "Great white shark",
    "Hammerhead shark",
    "Manta ray (Sailing)",
    "Mogre (Sailing)",
    "Narwhal",
    "Orca",
    "Osprey",
    "Pygmy kraken",
    "Spined kraken",
    "Stingray",
    "Tern",
    "Tiger shark",
];

/// Configuration for a normalization run
///
/// # Examples
///
/// ```
/// use bestiary_normalizer::NormalizerConfig;
/// use bestiary_domain::FilterMode;
///
/// let config = NormalizerConfig::default();
/// assert_eq!(config.filter, FilterMode::All);
/// assert!(config.skip_names.iter().any(|n| n == "Orca"));
///
/// let config = NormalizerConfig::from_toml(r#"filter = "boss""#).unwrap();
/// assert_eq!(config.filter, FilterMode::Boss);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Role filter applied after transformation
    pub filter: FilterMode,

    /// Page names rejected outright (exact match)
    pub skip_names: Vec<String>,

    /// Source tag written to each canonical monster
    pub source_tag: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            filter: FilterMode::All,
            skip_names: DEFAULT_SKIP_NAMES.iter().map(|s| s.to_string()).collect(),
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Replace the filter mode
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the skip-list
    pub fn with_skip_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), NormalizerError> {
        if self.source_tag.trim().is_empty() {
            return Err(NormalizerError::Config("source_tag must not be empty".to_string()));
        }
        if self.skip_names.iter().any(|n| n.is_empty()) {
            return Err(NormalizerError::Config("skip_names must not contain empty names".to_string()));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, NormalizerError> {
        toml::from_str(toml_str)
            .map_err(|e| NormalizerError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, NormalizerError> {
        toml::to_string_pretty(self)
            .map_err(|e| NormalizerError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
