//! Whitelisted entity fetching
//!
//! Mirrors of per-entity JSON (`{base}/{id}.json`) are fetched one ID at a
//! time. Missing or malformed payloads are collected rather than aborting
//! the batch, so callers can decide whether gaps are acceptable.

use crate::{Result, WikiError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-request timeout for entity fetches (15 seconds)
pub const ENTITY_TIMEOUT_SECS: u64 = 15;

const ITEMS_SUFFIX: &str = "items-json";
const MONSTERS_SUFFIX: &str = "monsters-json";

/// Kind of entity a whitelist names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Items
    Item,

    /// Monsters
    Monster,
}

impl EntityKind {
    /// Payload keys that may carry the entity's ID, in lookup order
    pub fn id_keys(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Item => &["id", "item_id"],
            EntityKind::Monster => &["id", "npc_id", "monster_id"],
        }
    }

    /// Singular label
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Monster => "monster",
        }
    }

    /// Capitalized label, for messages
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Item => "Item",
            EntityKind::Monster => "Monster",
        }
    }

    /// Plural label
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::Monster => "monsters",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "item" | "items" => Ok(EntityKind::Item),
            "monster" | "monsters" => Ok(EntityKind::Monster),
            other => Err(WikiError::Config(format!("Unknown entity kind: {}", other))),
        }
    }
}

/// Strip trailing slashes from a mirror base URL
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Monsters mirror next to an items mirror ending in `items-json`
///
/// # Examples
///
/// ```
/// use bestiary_wiki::entities::derive_monsters_base_url;
///
/// assert_eq!(
///     derive_monsters_base_url("https://cdn.example.org/docs/items-json/").as_deref(),
///     Some("https://cdn.example.org/docs/monsters-json")
/// );
/// assert_eq!(derive_monsters_base_url("https://cdn.example.org/items"), None);
/// ```
pub fn derive_monsters_base_url(items_base_url: &str) -> Option<String> {
    normalize_base_url(items_base_url)
        .strip_suffix(ITEMS_SUFFIX)
        .map(|prefix| format!("{}{}", prefix, MONSTERS_SUFFIX))
}

/// Mismatch warning when a payload's ID differs from the requested one
///
/// The first ID key present decides; a `null` value is not checked.
pub fn check_id(entity: &Map<String, Value>, requested: u32, kind: EntityKind) -> Option<String> {
    let found = kind.id_keys().iter().find_map(|key| entity.get(*key))?;

    let matches = match found {
        Value::Null => return None,
        Value::Number(n) => n.as_u64() == Some(u64::from(requested)),
        Value::String(s) => s.trim().parse::<u64>().ok() == Some(u64::from(requested)),
        _ => false,
    };

    if matches {
        None
    } else {
        Some(format!(
            "{} ID mismatch for {}: payload has {}",
            kind.title(),
            requested,
            found
        ))
    }
}

/// Outcome of fetching a whitelist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityBatch {
    /// Fetched payloads keyed by requested ID
    pub entities: BTreeMap<u32, Map<String, Value>>,

    /// IDs that could not be fetched
    pub missing: Vec<u32>,

    /// Fetch failures and ID mismatches, in request order
    pub warnings: Vec<String>,
}

impl EntityBatch {
    /// Whether every requested ID was fetched
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Fetches per-entity JSON from a mirror
pub struct EntityFetcher {
    base_url: String,
    kind: EntityKind,
    client: reqwest::Client,
}

impl EntityFetcher {
    /// Create a fetcher for a mirror base URL
    pub fn new(base_url: &str, kind: EntityKind, user_agent: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(WikiError::Config("entity base URL must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(ENTITY_TIMEOUT_SECS))
            .build()
            .map_err(|e| WikiError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            kind,
            client,
        })
    }

    /// Entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// URL of one entity's JSON
    pub fn url_for(&self, id: u32) -> String {
        format!("{}/{}.json", self.base_url, id)
    }

    /// Fetch one entity
    pub async fn fetch(&self, id: u32) -> Result<Map<String, Value>> {
        let url = self.url_for(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WikiError::Communication(format!("URL error for {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| WikiError::InvalidResponse(format!("Invalid JSON for {}: {}", url, e)))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(WikiError::InvalidResponse(format!(
                "Unexpected JSON structure for {}",
                url
            ))),
        }
    }

    /// Fetch every ID in order, collecting gaps instead of failing
    pub async fn fetch_all(&self, ids: &[u32]) -> EntityBatch {
        let mut batch = EntityBatch::default();

        for &id in ids {
            match self.fetch(id).await {
                Ok(entity) => {
                    if let Some(warning) = check_id(&entity, id, self.kind) {
                        warn!("{}", warning);
                        batch.warnings.push(warning);
                    }
                    debug!(id, kind = %self.kind, "fetched entity");
                    batch.entities.insert(id, entity);
                }
                Err(e) => {
                    warn!(id, error = %e, "failed to fetch {}", self.kind);
                    batch.warnings.push(e.to_string());
                    batch.missing.push(id);
                }
            }
        }

        info!(
            kind = %self.kind,
            fetched = batch.entities.len(),
            missing = batch.missing.len(),
            "entity fetch complete"
        );
        batch
    }
}
