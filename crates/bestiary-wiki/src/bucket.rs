//! Bucket API client
//!
//! Fetches every `infobox_monster` row from the wiki's bucket query API.
//! Pages are requested in ascending `page_name_sub` order and appended
//! until a short page or a response without a `bucket` key ends the scan.
//!
//! # Features
//!
//! - Async HTTP via reqwest with a configurable User-Agent and timeout
//! - Retry with exponential backoff for transient failures
//! - Pure query building and pagination, testable without a network
//!
//! # Examples
//!
//! ```no_run
//! use bestiary_wiki::{BucketClient, WikiConfig};
//!
//! # async fn run() -> Result<(), bestiary_wiki::WikiError> {
//! let client = BucketClient::new(WikiConfig::default())?;
//! let records = client.fetch_monsters().await?;
//! println!("fetched {} raw records", records.len());
//! # Ok(())
//! # }
//! ```

use crate::{Result, WikiError};
use bestiary_domain::fields;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default wiki API endpoint
pub const DEFAULT_API_BASE: &str = "https://oldschool.runescape.wiki/api.php";

/// Default User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "bestiary (monster data ingestion)";

/// Default rows per page; also the API's maximum
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Default request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per page
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Bucket holding monster infoboxes
pub const MONSTER_BUCKET: &str = "infobox_monster";

/// Connection settings for the bucket API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// `api.php` endpoint
    pub api_base: String,

    /// User-Agent header value
    pub user_agent: String,

    /// Rows requested per page
    pub page_size: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per page before giving up
    pub max_retries: u32,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl WikiConfig {
    /// Validate the settings
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.api_base.trim().is_empty() {
            return Err("wiki.api_base must not be empty".to_string());
        }
        if self.page_size == 0 {
            return Err("wiki.page_size must be positive".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("wiki.timeout_secs must be positive".to_string());
        }
        if self.max_retries == 0 {
            return Err("wiki.max_retries must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Build the bucket query string for one page
///
/// # Examples
///
/// ```
/// use bestiary_wiki::bucket::build_query;
///
/// let q = build_query("infobox_monster", &["id", "hitpoints"], 500, 1000);
/// assert_eq!(
///     q,
///     "bucket('infobox_monster').select('id','hitpoints').limit(500).offset(1000)\
///      .where(bucket.Not('Category:Discontinued content'))\
///      .orderBy('page_name_sub', 'asc').run()"
/// );
/// ```
pub fn build_query(bucket: &str, select: &[&str], limit: usize, offset: usize) -> String {
    let columns = select
        .iter()
        .map(|f| format!("'{}'", f))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "bucket('{}').select({}).limit({}).offset({})\
         .where(bucket.Not('Category:Discontinued content'))\
         .orderBy('page_name_sub', 'asc').run()",
        bucket, columns, limit, offset
    )
}

/// Rows of one response, or `None` when the response carries no `bucket`
///
/// A missing `bucket` key ends pagination; an `error` object from the API is
/// logged first.
pub fn extract_page(response: Value) -> Result<Option<Vec<Value>>> {
    let mut response = match response {
        Value::Object(map) => map,
        other => {
            return Err(WikiError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                other
            )))
        }
    };

    match response.remove("bucket") {
        Some(Value::Array(rows)) => Ok(Some(rows)),
        Some(other) => Err(WikiError::InvalidResponse(format!(
            "'bucket' is not an array: {}",
            other
        ))),
        None => {
            if let Some(error) = response.get("error") {
                warn!(%error, "bucket API returned an error, stopping pagination");
            }
            Ok(None)
        }
    }
}

/// Drive pagination with the given page fetcher
///
/// `fetch_page` receives the offset and returns the raw API response.
/// Rows are appended in page order. Stops after a page with fewer than
/// `page_size` rows or a response without a `bucket` key.
pub async fn paginate<F, Fut>(page_size: usize, mut fetch_page: F) -> Result<Vec<Value>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let mut records = Vec::new();
    let mut offset = 0;

    loop {
        info!(offset, "fetching monsters from wiki");
        let Some(rows) = extract_page(fetch_page(offset).await?)? else {
            break;
        };

        let count = rows.len();
        records.extend(rows);
        debug!(offset, count, total = records.len(), "page received");

        if count < page_size {
            break;
        }
        offset += page_size;
    }

    Ok(records)
}

/// Backoff before retry number `attempt` (1-based): 1s, 2s, 4s, ...
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt.saturating_sub(1)))
}

/// Async client for the wiki bucket API
pub struct BucketClient {
    config: WikiConfig,
    client: reqwest::Client,
}

impl BucketClient {
    /// Create a client from validated settings
    pub fn new(config: WikiConfig) -> Result<Self> {
        config.validate().map_err(WikiError::Config)?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WikiError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Active settings
    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    /// Fetch every raw monster record
    pub async fn fetch_monsters(&self) -> Result<Vec<Value>> {
        let records = paginate(self.config.page_size, |offset| self.fetch_page(offset)).await?;
        info!(records = records.len(), "fetched raw monster entries from wiki");
        Ok(records)
    }

    /// Fetch the raw response for one page, retrying transient failures
    pub async fn fetch_page(&self, offset: usize) -> Result<Value> {
        let query = build_query(MONSTER_BUCKET, fields::ALL, self.config.page_size, offset);

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.request(&query).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempts < self.config.max_retries => {
                    let delay = backoff_delay(attempts);
                    warn!(offset, attempts, ?delay, error = %e, "bucket request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request(&self, query: &str) -> Result<Value> {
        let response = self
            .client
            .get(&self.config.api_base)
            .query(&[("action", "bucket"), ("format", "json"), ("query", query)])
            .send()
            .await
            .map_err(|e| WikiError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Http {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| WikiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}
