//! Configuration management for the CLI.
//!
//! Lookup order: `--config <path>`, then `./bestiary.toml`, then
//! `~/.bestiary/config.toml`, then built-in defaults. Every section is
//! optional; missing keys take their defaults.

use crate::error::{CliError, Result};
use bestiary_normalizer::NormalizerConfig;
use bestiary_wiki::entities::{derive_monsters_base_url, normalize_base_url};
use bestiary_wiki::WikiConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "bestiary.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bucket API connection settings
    pub wiki: WikiConfig,

    /// Normalization settings
    pub normalizer: NormalizerConfig,

    /// Output settings
    pub output: OutputSettings,

    /// Whitelist pipeline settings
    pub entities: EntitiesSettings,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for per-monster JSON files
    pub monsters_dir: PathBuf,

    /// Format for printed entities
    pub format: OutputFormat,

    /// Enable colored output
    pub color: bool,
}

/// Whitelist pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitiesSettings {
    /// Items mirror base URL
    pub base_url: String,

    /// Items whitelist
    pub whitelist: PathBuf,

    /// Items output directory
    pub out_dir: PathBuf,

    /// Monsters mirror base URL; derived from `base_url` when empty
    pub monsters_base_url: String,

    /// Monsters whitelist
    pub monsters_whitelist: PathBuf,

    /// Monsters output directory
    pub monsters_out_dir: PathBuf,

    /// Allow missing IDs instead of failing
    pub allow_missing: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (IDs only) format
    Quiet,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            monsters_dir: PathBuf::from("data/monsters"),
            format: OutputFormat::Json,
            color: true,
        }
    }
}

impl Default for EntitiesSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            whitelist: PathBuf::from("data/item-ids.json"),
            out_dir: PathBuf::from("data/items"),
            monsters_base_url: String::new(),
            monsters_whitelist: PathBuf::from("data/monster-ids.json"),
            monsters_out_dir: PathBuf::from("data/monsters"),
            allow_missing: false,
        }
    }
}

impl EntitiesSettings {
    /// Items base URL, required for `ingest-all`
    pub fn items_base_url(&self) -> Result<String> {
        let url = normalize_base_url(self.base_url.trim());
        if url.is_empty() {
            return Err(CliError::Config("entities.base_url is not set".to_string()));
        }
        Ok(url)
    }

    /// Monsters base URL, explicit or derived from the items URL
    pub fn monsters_base_url(&self) -> Result<String> {
        let explicit = self.monsters_base_url.trim();
        if !explicit.is_empty() {
            return Ok(normalize_base_url(explicit));
        }
        derive_monsters_base_url(&self.items_base_url()?).ok_or_else(|| {
            CliError::Config(
                "set entities.monsters_base_url or use an items base_url ending in items-json"
                    .to_string(),
            )
        })
    }
}

impl Config {
    /// Per-user configuration file path.
    pub fn user_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".bestiary").join("config.toml"))
    }

    /// Resolve which file to load, if any.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Ok(Some(local));
        }

        // No home directory just means no user config
        Ok(Self::user_path().ok().filter(|p| p.exists()))
    }

    /// Load configuration following the lookup order.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit)? {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.wiki.validate().map_err(CliError::Config)?;
        self.normalizer.validate()?;
        Ok(())
    }
}
