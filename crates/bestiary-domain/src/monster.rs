//! Canonical monster - the normalized entity produced by ingestion

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric NPC identifier
///
/// Always positive for monsters that reach the canonical set; the
/// classifier rejects records whose identifier coerces to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Create an identifier, rejecting zero
    ///
    /// # Examples
    ///
    /// ```
    /// use bestiary_domain::MonsterId;
    ///
    /// assert!(MonsterId::new(0).is_none());
    /// assert_eq!(MonsterId::new(415).unwrap().value(), 415);
    /// ```
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Get the raw value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monster in canonical form
///
/// Every field has a strict type; raw field shapes have already been
/// coerced. `slayer_monster` and `boss` are derived from `category`,
/// `attributes` and slayer XP and are never read from the source directly.
///
/// A `version` of `None` marks the base (unversioned) form of a named
/// entity. Several versions of one page may share an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMonster {
    /// NPC identifier, unique within a run's output
    pub id: MonsterId,

    /// Display name
    pub name: String,

    /// Variant suffix of the sub-page name; `None` for the base form
    pub version: Option<String>,

    /// Combat level
    pub combat_level: i64,

    /// Hitpoints (always at least 1)
    pub hitpoints: u32,

    // Combat levels
    /// Attack level
    pub attack_level: i64,
    /// Strength level
    pub strength_level: i64,
    /// Defence level
    pub defence_level: i64,
    /// Magic level
    pub magic_level: i64,
    /// Ranged level
    pub ranged_level: i64,

    // Offensive bonuses
    /// Melee attack bonus
    pub attack_bonus: i64,
    /// Melee strength bonus
    pub strength_bonus: i64,
    /// Magic attack bonus
    pub attack_magic: i64,
    /// Magic damage bonus
    pub magic_bonus: i64,
    /// Ranged attack bonus
    pub attack_ranged: i64,
    /// Ranged strength bonus
    pub ranged_bonus: i64,

    // Defence bonuses
    /// Stab defence
    pub defence_stab: i64,
    /// Slash defence
    pub defence_slash: i64,
    /// Crush defence
    pub defence_crush: i64,
    /// Magic defence
    pub defence_magic: i64,
    /// Legacy aggregate ranged defence
    pub defence_ranged: i64,
    /// Light ranged defence, independent of `defence_ranged`
    pub defence_ranged_light: i64,
    /// Standard ranged defence, independent of `defence_ranged`
    pub defence_ranged_standard: i64,
    /// Heavy ranged defence, independent of `defence_ranged`
    pub defence_ranged_heavy: i64,

    /// Attack speed in game ticks
    pub attack_speed: u32,

    /// Lowercase attack style tags, never containing placeholders
    pub attack_type: Vec<String>,

    /// Highest listed max hit
    pub max_hit: i64,

    /// Size in tiles (defaults to 1)
    pub size: u32,

    /// Lowercase attribute tags (e.g. "demon", "boss")
    pub attributes: Vec<String>,

    /// Slayer categories, case preserved (e.g. "Bosses")
    pub category: Vec<String>,

    /// Assignable as a slayer task
    pub slayer_monster: bool,

    /// Slayer level required (defaults to 1)
    pub slayer_level: u32,

    /// Slayer experience per kill
    pub slayer_xp: f64,

    /// Boss flag
    pub boss: bool,

    /// Immune to poison
    pub immune_poison: bool,

    /// Immune to venom
    pub immune_venom: bool,

    /// Elemental weakness, `None` when absent or empty
    pub elemental_weakness: Option<String>,

    /// Elemental weakness strength in percent
    pub elemental_weakness_percent: i64,

    /// Tag identifying the data source
    #[serde(rename = "_source")]
    pub source: String,

    /// Qualified wiki sub-page the record came from
    #[serde(rename = "_wiki_page")]
    pub wiki_page: String,
}

impl CanonicalMonster {
    /// Whether this is the base (unversioned) form
    pub fn is_base_form(&self) -> bool {
        self.version.is_none()
    }

    /// Whether this is a versioned variant
    pub fn is_versioned(&self) -> bool {
        self.version.is_some()
    }

    /// Display label including the version, e.g. `Vorkath (Post-quest)`
    pub fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("{} ({})", self.name, version),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal monster for tests
    pub fn monster(id: u32, name: &str, version: Option<&str>) -> CanonicalMonster {
        CanonicalMonster {
            id: MonsterId::new(id).expect("test ids are positive"),
            name: name.to_string(),
            version: version.map(str::to_string),
            combat_level: 1,
            hitpoints: 1,
            attack_level: 1,
            strength_level: 1,
            defence_level: 1,
            magic_level: 1,
            ranged_level: 1,
            attack_bonus: 0,
            strength_bonus: 0,
            attack_magic: 0,
            magic_bonus: 0,
            attack_ranged: 0,
            ranged_bonus: 0,
            defence_stab: 0,
            defence_slash: 0,
            defence_crush: 0,
            defence_magic: 0,
            defence_ranged: 0,
            defence_ranged_light: 0,
            defence_ranged_standard: 0,
            defence_ranged_heavy: 0,
            attack_speed: 4,
            attack_type: vec![],
            max_hit: 0,
            size: 1,
            attributes: vec![],
            category: vec![],
            slayer_monster: false,
            slayer_level: 1,
            slayer_xp: 0.0,
            boss: false,
            immune_poison: false,
            immune_venom: false,
            elemental_weakness: None,
            elemental_weakness_percent: 0,
            source: "test".to_string(),
            wiki_page: name.to_string(),
        }
    }
}
