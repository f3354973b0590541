//! Run statistics

use crate::classifier::Rule;
use crate::dedup::Resolution;
use std::collections::BTreeMap;

/// Counters collected during a normalization run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Raw records seen
    pub processed: usize,

    /// Rejections per classifier rule
    pub rejections: BTreeMap<Rule, usize>,

    /// Canonical monsters dropped by the category filter
    pub filtered: usize,

    /// Entities that lost a collision (kept or replaced predecessor)
    pub duplicates: usize,

    /// Collisions where a base form displaced a versioned entry
    pub replaced: usize,

    /// Unique entities in the final mapping
    pub kept: usize,
}

impl RunStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw record entering the pipeline
    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    /// Record a classifier rejection
    pub fn record_rejection(&mut self, rule: Rule) {
        *self.rejections.entry(rule).or_insert(0) += 1;
    }

    /// Record a category filter drop
    pub fn record_filtered(&mut self) {
        self.filtered += 1;
    }

    /// Record a reducer outcome
    pub fn record_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Insert => {}
            Resolution::KeepExisting => self.duplicates += 1,
            Resolution::Replace => {
                self.duplicates += 1;
                self.replaced += 1;
            }
        }
    }

    /// Total records rejected by the classifier
    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    /// One-line run summary
    ///
    /// "skipped" counts classifier rejections only; losing duplicates
    /// appear in [`RunStats::report`].
    pub fn summary(&self) -> String {
        format!(
            "Processed: {} unique monsters (skipped {}, filtered {})",
            self.kept,
            self.rejected(),
            self.filtered
        )
    }

    /// Multi-line breakdown, one line per rule that fired
    pub fn report(&self) -> String {
        let mut lines = vec![
            format!("Raw records: {}", self.processed),
            format!("Rejected: {}", self.rejected()),
        ];
        for (rule, count) in &self.rejections {
            lines.push(format!("  {}: {}", rule, count));
        }
        lines.push(format!("Filtered: {}", self.filtered));
        lines.push(format!(
            "Duplicates: {} ({} replaced by base form)",
            self.duplicates, self.replaced
        ));
        lines.push(format!("Kept: {}", self.kept));
        lines.join("\n")
    }
}
