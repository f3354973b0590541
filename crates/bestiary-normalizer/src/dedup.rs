//! Deduplication reducer
//!
//! Folds canonical monsters, in source order, into an [`EntityMapping`]
//! keyed by ID. The first-seen entity for an ID wins, except that an
//! unversioned (base form) arrival displaces a versioned predecessor.
//!
//! Strict first-seen ingestion never replaces; the base-form exception is
//! the only place the two policies give different output.

use bestiary_domain::{CanonicalMonster, EntityMapping};
use tracing::debug;

/// How a collision (or its absence) was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// ID was new; the incoming entity was inserted
    Insert,

    /// ID was taken; the existing entity was kept
    KeepExisting,

    /// ID was taken by a versioned entity; the unversioned arrival replaced it
    Replace,
}

/// Decide how an incoming entity resolves against the current holder of its ID
pub fn resolve(existing: Option<&CanonicalMonster>, incoming: &CanonicalMonster) -> Resolution {
    match existing {
        None => Resolution::Insert,
        Some(held) if held.is_versioned() && incoming.is_base_form() => Resolution::Replace,
        Some(_) => Resolution::KeepExisting,
    }
}

/// Apply one entity to the mapping
pub fn reduce(mut mapping: EntityMapping, incoming: CanonicalMonster) -> (EntityMapping, Resolution) {
    let resolution = resolve(mapping.get(incoming.id), &incoming);
    match resolution {
        Resolution::Insert => {
            mapping.insert(incoming);
        }
        Resolution::Replace => {
            debug!(id = %incoming.id, name = %incoming.name, "base form replaces versioned entry");
            mapping.insert(incoming);
        }
        Resolution::KeepExisting => {
            debug!(
                id = %incoming.id,
                duplicate = %incoming.label(),
                "duplicate id, keeping first-seen entry"
            );
        }
    }
    (mapping, resolution)
}

/// Fold a whole sequence into a fresh mapping
pub fn deduplicate<I>(monsters: I) -> EntityMapping
where
    I: IntoIterator<Item = CanonicalMonster>,
{
    monsters
        .into_iter()
        .fold(EntityMapping::new(), |mapping, monster| reduce(mapping, monster).0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::monster;
    use bestiary_domain::MonsterId;
    use proptest::prelude::*;

    fn kept(mapping: &EntityMapping, id: u32) -> Option<String> {
        let id = MonsterId::new(id)?;
        mapping.get(id).map(|m| m.label())
    }

    #[test]
    fn test_base_then_versioned_keeps_base() {
        let a = monster(5, "Foo", None);
        let b = monster(5, "Foo", Some("Hard mode"));
        let mapping = deduplicate([a, b]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(kept(&mapping, 5).as_deref(), Some("Foo"));
    }

    #[test]
    fn test_versioned_then_base_switches_to_base() {
        let b = monster(5, "Foo", Some("Hard mode"));
        let a = monster(5, "Foo", None);
        let mapping = deduplicate([b, a]);
        assert_eq!(kept(&mapping, 5).as_deref(), Some("Foo"));
    }

    #[test]
    fn test_both_versioned_keeps_first() {
        let first = monster(8, "Vorkath", Some("Post-quest"));
        let second = monster(8, "Vorkath", Some("Dragon Slayer II"));
        let mapping = deduplicate([first, second]);
        assert_eq!(kept(&mapping, 8).as_deref(), Some("Vorkath (Post-quest)"));
    }

    #[test]
    fn test_both_unversioned_keeps_first() {
        let first = monster(9, "Guard", None);
        let second = monster(9, "Guard (Varrock)", None);
        let mapping = deduplicate([first, second]);
        assert_eq!(kept(&mapping, 9).as_deref(), Some("Guard"));
    }

    #[test]
    fn test_replaced_base_is_never_displaced() {
        let mapping = deduplicate([
            monster(3, "Imp", Some("Level 2")),
            monster(3, "Imp", None),
            monster(3, "Imp", Some("Level 7")),
            monster(3, "Impling", None),
        ]);
        assert_eq!(kept(&mapping, 3).as_deref(), Some("Imp"));
    }

    #[test]
    fn test_resolutions_reported() {
        let (mapping, r1) = reduce(EntityMapping::new(), monster(1, "A", Some("v")));
        let (mapping, r2) = reduce(mapping, monster(1, "A", Some("w")));
        let (mapping, r3) = reduce(mapping, monster(1, "A", None));
        let (_, r4) = reduce(mapping, monster(1, "A", None));
        assert_eq!(
            [r1, r2, r3, r4],
            [
                Resolution::Insert,
                Resolution::KeepExisting,
                Resolution::Replace,
                Resolution::KeepExisting,
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_deduplicate_is_deterministic(
            specs in prop::collection::vec((1u32..6, prop::option::of(0u8..3)), 0..30)
        ) {
            let monsters: Vec<CanonicalMonster> = specs
                .iter()
                .enumerate()
                .map(|(i, (id, version))| {
                    let version = version.map(|v| format!("v{}", v));
                    monster(*id, &format!("M{}", i), version.as_deref())
                })
                .collect();

            let first = deduplicate(monsters.clone());
            let second = deduplicate(monsters.clone());
            prop_assert_eq!(&first, &second);

            // one entry per distinct id
            let mut distinct: Vec<u32> = specs.iter().map(|(id, _)| *id).collect();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(first.len(), distinct.len());

            // any id that ever had a base form keeps a base form
            for id in distinct {
                let had_base = monsters.iter().any(|m| m.id.value() == id && m.is_base_form());
                let held = first.get(MonsterId::new(id).unwrap()).unwrap();
                prop_assert_eq!(held.is_base_form(), had_base);
            }
        }
    }
}
