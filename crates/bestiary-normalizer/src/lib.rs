//! Bestiary Normalizer
//!
//! Turns untrusted wiki bucket records into a deduplicated set of canonical
//! monsters. The pipeline is synchronous and side-effect free:
//!
//! - Field coercers: total conversions from any raw shape to a typed value
//! - Tag stripper: removes wiki parser markers from every string
//! - Record classifier: ordered exclusion rules, first match rejects
//! - Canonical transformer: field mapping plus derived flags
//! - Category filter: all / slayer / boss / slayer+boss
//! - Deduplication reducer: one entity per ID, base forms preferred
//!
//! # Examples
//!
//! ```
//! use bestiary_normalizer::{Normalizer, NormalizerConfig};
//! use bestiary_domain::FilterMode;
//! use serde_json::json;
//!
//! let config = NormalizerConfig::default().with_filter(FilterMode::SlayerOrBoss);
//! let normalizer = Normalizer::new(config).unwrap();
//!
//! let output = normalizer.run_value(json!([
//!     {"page_name": "Abyssal demon", "page_name_sub": "Abyssal demon#Standard",
//!      "id": 415, "hitpoints": 150, "slayer_category": "Abyssal demons"},
//! ])).unwrap();
//!
//! assert_eq!(output.mapping.len(), 1);
//! println!("{}", output.stats.summary());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod coerce;
pub mod dedup;
pub mod filter;
pub mod strip;
pub mod transform;

mod config;
mod error;
mod normalizer;
mod stats;

#[cfg(test)]
mod fixtures;

pub use classifier::{Admission, Classifier, Rule, Verdict};
pub use config::{NormalizerConfig, DEFAULT_SKIP_NAMES, DEFAULT_SOURCE_TAG};
pub use dedup::{deduplicate, Resolution};
pub use error::NormalizerError;
pub use filter::should_include;
pub use normalizer::{NormalizeOutput, Normalizer, RecordOutcome};
pub use stats::RunStats;
pub use strip::StripTags;
