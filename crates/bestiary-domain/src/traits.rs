//! Trait definitions for external interactions
//!
//! These traits define the boundary between the normalization core and the
//! collaborators that feed it. Network and file implementations live in
//! other crates.

use serde_json::Value;

/// A finite, ordered supply of raw records
///
/// Implemented by the infrastructure layer (bestiary-wiki, bestiary-cli).
/// Implementations are responsible for pagination; the core assumes it
/// receives a fully materialized sequence with no duplicates across pages.
pub trait RecordSource {
    /// Error type for retrieval
    type Error;

    /// Retrieve every raw record, in source order
    fn records(&self) -> Result<Vec<Value>, Self::Error>;

    /// Short tag naming the source, written into canonical output
    fn source_tag(&self) -> &str;
}

/// In-memory records, mainly for tests and offline dumps
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tag: String,
    records: Vec<Value>,
}

impl StaticSource {
    /// Create a source over pre-loaded records
    pub fn new(tag: impl Into<String>, records: Vec<Value>) -> Self {
        Self {
            tag: tag.into(),
            records,
        }
    }
}

impl RecordSource for StaticSource {
    type Error = std::convert::Infallible;

    fn records(&self) -> Result<Vec<Value>, Self::Error> {
        Ok(self.records.clone())
    }

    fn source_tag(&self) -> &str {
        &self.tag
    }
}
