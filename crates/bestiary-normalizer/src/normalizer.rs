//! Normalization pipeline
//!
//! Drives raw records through classifier, transformer, category filter and
//! deduplication reducer, in that order, in a single synchronous pass.

use crate::classifier::{Classifier, Rule, Verdict};
use crate::dedup::reduce;
use crate::error::json_type_name;
use crate::filter::should_include;
use crate::stats::RunStats;
use crate::transform::transform;
use crate::{NormalizerConfig, NormalizerError};
use bestiary_domain::{fields, CanonicalMonster, EntityMapping, RawRecord, RecordSource};
use serde_json::Value;
use std::fmt::Display;
use tracing::{debug, info};

/// What happened to a single raw record before deduplication
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Dropped by a classifier rule
    Rejected(Rule),

    /// Transformed, then dropped by the category filter
    Filtered(CanonicalMonster),

    /// Transformed and admitted to the reducer
    Admitted(CanonicalMonster),
}

/// Result of a full run
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutput {
    /// Unique canonical monsters keyed by ID
    pub mapping: EntityMapping,

    /// Counters collected along the way
    pub stats: RunStats,
}

/// Normalizes raw wiki records into a deduplicated entity mapping
///
/// # Examples
///
/// ```
/// use bestiary_normalizer::{Normalizer, NormalizerConfig};
/// use serde_json::json;
///
/// let normalizer = Normalizer::new(NormalizerConfig::default()).unwrap();
/// let output = normalizer
///     .run_value(json!([
///         {"page_name": "Goblin", "page_name_sub": "Goblin", "id": 3029, "hitpoints": 5},
///         {"page_name": "Goblin", "page_name_sub": "Goblin#Armed", "id": 3029, "hitpoints": 5},
///         {"page_name": "Strong Barrier", "page_name_sub": "Strong Barrier", "id": 1, "hitpoints": 1},
///     ]))
///     .unwrap();
///
/// assert_eq!(output.mapping.len(), 1);
/// assert_eq!(output.stats.rejected(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    classifier: Classifier,
}

impl Normalizer {
    /// Create a normalizer from validated configuration
    pub fn new(config: NormalizerConfig) -> Result<Self, NormalizerError> {
        config.validate()?;
        let classifier = Classifier::from_config(&config);
        Ok(Self { config, classifier })
    }

    /// Create a normalizer with default configuration
    pub fn default_config() -> Self {
        let config = NormalizerConfig::default();
        let classifier = Classifier::from_config(&config);
        Self { config, classifier }
    }

    /// Active configuration
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Classify, transform and filter one record
    pub fn normalize_record(&self, record: &RawRecord) -> RecordOutcome {
        let admission = match self.classifier.classify(record) {
            Verdict::Accept(admission) => admission,
            Verdict::Reject(rule) => return RecordOutcome::Rejected(rule),
        };

        let monster = transform(record, &admission, &self.config.source_tag);
        if should_include(&monster, self.config.filter) {
            RecordOutcome::Admitted(monster)
        } else {
            RecordOutcome::Filtered(monster)
        }
    }

    /// Run the full pipeline over a sequence of records
    ///
    /// Fails only when an element is not a JSON object. Malformed fields,
    /// rejections and duplicates are normal outcomes counted in the stats.
    pub fn run<I>(&self, records: I) -> Result<NormalizeOutput, NormalizerError>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut stats = RunStats::new();
        let mut mapping = EntityMapping::new();

        for (index, value) in records.into_iter().enumerate() {
            let record = RawRecord::try_from(value).map_err(|v| NormalizerError::NotAnObject {
                index,
                found: json_type_name(&v),
            })?;
            stats.record_processed();

            match self.normalize_record(&record) {
                RecordOutcome::Rejected(rule) => {
                    let page = record
                        .get(fields::PAGE_NAME_SUB)
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or("");
                    debug!(
                        index,
                        page,
                        rule = %rule,
                        "record rejected: {}",
                        rule.reason()
                    );
                    stats.record_rejection(rule);
                }
                RecordOutcome::Filtered(monster) => {
                    debug!(id = %monster.id, name = %monster.label(), "filtered out");
                    stats.record_filtered();
                }
                RecordOutcome::Admitted(monster) => {
                    let (next, resolution) = reduce(mapping, monster);
                    mapping = next;
                    stats.record_resolution(resolution);
                }
            }
        }

        stats.kept = mapping.len();
        debug_assert!(mapping.ids().windows(2).all(|w| w[0] < w[1]));

        info!(
            processed = stats.processed,
            rejected = stats.rejected(),
            filtered = stats.filtered,
            duplicates = stats.duplicates,
            kept = stats.kept,
            filter = %self.config.filter,
            "normalization complete"
        );

        Ok(NormalizeOutput { mapping, stats })
    }

    /// Run over a top-level JSON value, which must be an array
    pub fn run_value(&self, value: Value) -> Result<NormalizeOutput, NormalizerError> {
        match value {
            Value::Array(records) => self.run(records),
            other => Err(NormalizerError::NotIterable(json_type_name(&other))),
        }
    }

    /// Run over every record a source provides
    pub fn run_source<S>(&self, source: &S) -> Result<NormalizeOutput, NormalizerError>
    where
        S: RecordSource,
        S::Error: Display,
    {
        let records = source
            .records()
            .map_err(|e| NormalizerError::Source(e.to_string()))?;
        info!(source = source.source_tag(), records = records.len(), "normalizing source");
        self.run(records)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::record;
    use bestiary_domain::{FilterMode, MonsterId, StaticSource};
    use serde_json::json;

    fn value(record: RawRecord) -> Value {
        Value::Object(record.into_map())
    }

    #[test]
    fn test_run_counts_every_stage() {
        let records = vec![
            value(record(1, "Goblin", None)),
            value(record(1, "Goblin", Some("Armed"))),
            value(record(2, "Cow", None).with("hitpoints", 0)),
            value(record(3, "Tekton", Some("Challenge Mode"))),
            value(record(4, "Chicken", None)),
        ];
        let output = Normalizer::default().run(records).unwrap();

        assert_eq!(output.stats.processed, 5);
        assert_eq!(output.stats.rejected(), 2);
        assert_eq!(output.stats.duplicates, 1);
        assert_eq!(output.stats.kept, 2);
        assert_eq!(output.mapping.ids(), vec![MonsterId::new(1).unwrap(), MonsterId::new(4).unwrap()]);
    }

    #[test]
    fn test_run_with_debug_logging_enabled() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let records = vec![
            value(record(1, "Goblin", None)),
            value(record(2, "Cow", None).with("hitpoints", 0)),
            value(record(1, "Goblin", Some("Armed"))),
        ];

        let output = tracing::subscriber::with_default(subscriber, || {
            Normalizer::default().run(records).unwrap()
        });
        assert_eq!(output.stats.rejected(), 1);
        assert_eq!(output.stats.duplicates, 1);
    }

    #[test]
    fn test_filter_applies_after_classification() {
        let config = NormalizerConfig::default().with_filter(FilterMode::Boss);
        let normalizer = Normalizer::new(config).unwrap();
        let records = vec![
            value(record(10, "Giant mole", None).with("attribute", "boss")),
            value(record(11, "Rat", None)),
        ];
        let output = normalizer.run(records).unwrap();
        assert_eq!(output.mapping.len(), 1);
        assert_eq!(output.stats.filtered, 1);
        assert_eq!(output.stats.rejected(), 0);
    }

    #[test]
    fn test_non_array_input_is_error() {
        let err = Normalizer::default().run_value(json!({"id": 1})).unwrap_err();
        assert!(matches!(err, NormalizerError::NotIterable("object")));
    }

    #[test]
    fn test_non_object_record_is_error() {
        let err = Normalizer::default()
            .run_value(json!([value(record(1, "Goblin", None)), 42]))
            .unwrap_err();
        assert!(matches!(err, NormalizerError::NotAnObject { index: 1, found: "number" }));
    }

    #[test]
    fn test_empty_input_gives_empty_mapping() {
        let output = Normalizer::default().run_value(json!([])).unwrap();
        assert!(output.mapping.is_empty());
        assert_eq!(output.stats, RunStats::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = NormalizerConfig::default();
        config.source_tag = String::new();
        assert!(Normalizer::new(config).is_err());
    }

    #[test]
    fn test_run_source_uses_source_records() {
        let source = StaticSource::new("dump", vec![value(record(7, "Imp", None))]);
        let output = Normalizer::default().run_source(&source).unwrap();
        assert_eq!(output.mapping.len(), 1);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let records = vec![
            value(record(5, "Foo", Some("Hard mode"))),
            value(record(5, "Foo", None)),
            value(record(6, "Bar", None)),
        ];
        let normalizer = Normalizer::default();
        let first = normalizer.run(records.clone()).unwrap();
        let second = normalizer.run(records).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.stats.replaced, 1);
    }
}
