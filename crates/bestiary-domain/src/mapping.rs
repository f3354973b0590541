//! Entity mapping - the terminal artifact of a normalization run

use crate::{CanonicalMonster, MonsterId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from monster ID to exactly one canonical monster
///
/// Built by the deduplication reducer and handed read-only to the output
/// stage. Iteration is in ascending ID order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityMapping {
    entries: BTreeMap<MonsterId, CanonicalMonster>,
}

impl EntityMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the monster for an ID
    pub fn get(&self, id: MonsterId) -> Option<&CanonicalMonster> {
        self.entries.get(&id)
    }

    /// Whether an ID is present
    pub fn contains(&self, id: MonsterId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Store a monster under its ID, returning the entry it displaced
    pub fn insert(&mut self, monster: CanonicalMonster) -> Option<CanonicalMonster> {
        self.entries.insert(monster.id, monster)
    }

    /// Number of monsters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// IDs in ascending order
    pub fn ids(&self) -> Vec<MonsterId> {
        self.entries.keys().copied().collect()
    }

    /// Iterate monsters in ascending ID order
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalMonster> {
        self.entries.values()
    }

    /// Build the summary index for this mapping
    pub fn index(&self, source: impl Into<String>) -> IndexSummary {
        IndexSummary {
            count: self.len(),
            ids: self.ids(),
            source: source.into(),
        }
    }
}

impl IntoIterator for EntityMapping {
    type Item = CanonicalMonster;
    type IntoIter = std::collections::btree_map::IntoValues<MonsterId, CanonicalMonster>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

/// Summary index written alongside per-entity files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    /// Number of entities
    pub count: usize,

    /// Sorted entity IDs
    pub ids: Vec<MonsterId>,

    /// Data source tag
    pub source: String,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::monster::fixtures::monster;
    use proptest::prelude::*;

    proptest! {
        /// Property: IDs come back strictly ascending, one per distinct input ID
        #[test]
        fn test_ids_sorted_and_unique(raw_ids in prop::collection::vec(1u32..500, 0..60)) {
            let mut mapping = EntityMapping::new();
            for id in &raw_ids {
                mapping.insert(monster(*id, "M", None));
            }

            let ids = mapping.ids();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));

            let mut distinct = raw_ids.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(ids.len(), distinct.len());
        }
    }
}
