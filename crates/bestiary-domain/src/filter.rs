//! Filter mode - which canonical monsters a run keeps

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role-based selection applied after normalization
///
/// Modes:
/// - All: keep every accepted monster
/// - Slayer: keep slayer-task-eligible monsters
/// - Boss: keep bosses
/// - SlayerOrBoss: keep monsters that are either
///
/// Unrecognized mode strings fall back to `All` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterMode {
    /// No filtering
    #[default]
    All,

    /// Slayer-task-eligible monsters only
    Slayer,

    /// Bosses only
    Boss,

    /// Slayer monsters and bosses
    SlayerOrBoss,
}

impl FilterMode {
    /// Get the mode name as used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Slayer => "slayer",
            FilterMode::Boss => "boss",
            FilterMode::SlayerOrBoss => "slayer+boss",
        }
    }

    /// Parse a mode, returning `None` for unrecognized values
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(FilterMode::All),
            "slayer" => Some(FilterMode::Slayer),
            "boss" => Some(FilterMode::Boss),
            "slayer+boss" => Some(FilterMode::SlayerOrBoss),
            _ => None,
        }
    }

    /// Parse a mode, falling back to `All` for unrecognized values
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl From<String> for FilterMode {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self {
        mode.as_str().to_string()
    }
}
