//! Record classifier
//!
//! Decides whether a raw record describes a real, attackable, non-duplicate
//! monster. Exclusion rules form an ordered table evaluated short-circuit;
//! the first rule that fires rejects the record and rejection is final.

use crate::coerce::{coerce_int, coerce_string};
use crate::NormalizerConfig;
use bestiary_domain::{fields, MonsterId, RawRecord};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Version markers of non-combat states of an otherwise valid monster
const NON_COMBAT_STATES: [&str; 3] = ["Spawn point", "Asleep", "Defeated"];

/// Lowercased name markers of game-mode copies of a base monster
const MODE_VARIANT_MARKERS: [&str; 4] = [
    "(historical)",
    "(pvm arena)",
    "(deadman: apocalypse)",
    "(last man standing)",
];

static NAMESPACE: OnceLock<Regex> = OnceLock::new();
static BARRIER: OnceLock<Regex> = OnceLock::new();

fn namespace_pattern() -> &'static Regex {
    NAMESPACE.get_or_init(|| Regex::new(r"^[A-Za-z]+:").expect("namespace pattern is valid"))
}

fn barrier_pattern() -> &'static Regex {
    BARRIER.get_or_init(|| {
        Regex::new(r"^(Strong|Weak|Medium|Overcharged) Barrier$").expect("barrier pattern is valid")
    })
}

/// Fields of a raw record the rules look at
///
/// Built once per record. Coercion is total, so building the view never
/// fails regardless of field shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    /// Display name
    pub page_name: String,

    /// Qualified sub-page name
    pub page_name_sub: String,

    /// Text after the first `#` of the sub-page name, empty when absent
    pub version: String,

    /// Coerced identifier
    pub id: i64,

    /// Coerced hitpoints
    pub hitpoints: i64,
}

impl RecordView {
    /// Extract the classified fields from a record
    pub fn of(record: &RawRecord) -> Self {
        let page_name_sub = coerce_string(record.field(fields::PAGE_NAME_SUB), "");
        let version = extract_version(&page_name_sub).to_string();
        Self {
            page_name: coerce_string(record.field(fields::PAGE_NAME), ""),
            page_name_sub,
            version,
            id: coerce_int(record.field(fields::ID), 0),
            hitpoints: coerce_int(record.field(fields::HITPOINTS), 0),
        }
    }
}

/// Version suffix of a qualified sub-page name (`Name#Version`)
///
/// # Examples
///
/// ```
/// use bestiary_normalizer::classifier::extract_version;
///
/// assert_eq!(extract_version("Vorkath#Post-quest"), "Post-quest");
/// assert_eq!(extract_version("Goblin"), "");
/// ```
pub fn extract_version(page_name_sub: &str) -> &str {
    page_name_sub
        .split_once('#')
        .map(|(_, version)| version)
        .unwrap_or("")
}

/// Exclusion rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rule {
    /// Challenge Mode variants are a game mode, not distinct monsters
    ChallengeMode,

    /// Pages outside the main content namespace
    NonContentNamespace,

    /// Page name on the configured skip-list
    SkipListed,

    /// Spawn points and asleep/defeated states
    NonCombatState,

    /// Barrier structures that cannot be attacked
    Barrier,

    /// Identifier missing, zero, or not representable
    InvalidId,

    /// Zero or missing hitpoints (not attackable)
    NoHitpoints,

    /// Historical and minigame copies of a base monster
    ModeVariant,
}

impl Rule {
    /// Every rule, in priority order
    pub const ALL: [Rule; 8] = [
        Rule::ChallengeMode,
        Rule::NonContentNamespace,
        Rule::SkipListed,
        Rule::NonCombatState,
        Rule::Barrier,
        Rule::InvalidId,
        Rule::NoHitpoints,
        Rule::ModeVariant,
    ];

    /// Short stable name, used in logs and statistics
    pub fn name(&self) -> &'static str {
        match self {
            Rule::ChallengeMode => "challenge-mode",
            Rule::NonContentNamespace => "non-content-namespace",
            Rule::SkipListed => "skip-listed",
            Rule::NonCombatState => "non-combat-state",
            Rule::Barrier => "barrier",
            Rule::InvalidId => "invalid-id",
            Rule::NoHitpoints => "no-hitpoints",
            Rule::ModeVariant => "mode-variant",
        }
    }

    /// Human-readable rejection reason
    pub fn reason(&self) -> &'static str {
        match self {
            Rule::ChallengeMode => "Challenge Mode variant",
            Rule::NonContentNamespace => "page outside the main namespace",
            Rule::SkipListed => "discontinued, unreleased or special entity",
            Rule::NonCombatState => "spawn point or non-combat state",
            Rule::Barrier => "non-attackable barrier",
            Rule::InvalidId => "missing or zero id",
            Rule::NoHitpoints => "zero hitpoints",
            Rule::ModeVariant => "historical or minigame duplicate",
        }
    }

    /// Whether this rule rejects the record
    pub fn rejects(&self, view: &RecordView, skip_names: &HashSet<String>) -> bool {
        match self {
            Rule::ChallengeMode => view.version.contains("Challenge Mode"),
            Rule::NonContentNamespace => namespace_pattern().is_match(&view.page_name_sub),
            Rule::SkipListed => skip_names.contains(&view.page_name),
            Rule::NonCombatState => NON_COMBAT_STATES.iter().any(|s| view.version.contains(s)),
            Rule::Barrier => barrier_pattern().is_match(&view.page_name_sub),
            Rule::InvalidId => positive_u32(view.id).is_none(),
            Rule::NoHitpoints => positive_u32(view.hitpoints).is_none(),
            Rule::ModeVariant => {
                let lowered = view.page_name.to_lowercase();
                MODE_VARIANT_MARKERS.iter().any(|m| lowered.contains(m))
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn positive_u32(n: i64) -> Option<u32> {
    u32::try_from(n).ok().filter(|v| *v > 0)
}

/// What the classifier learned about an accepted record
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    /// Positive identifier
    pub id: MonsterId,

    /// Hitpoints, at least 1
    pub hitpoints: u32,

    /// Version suffix; `None` for the base form
    pub version: Option<String>,

    /// Display name
    pub page_name: String,

    /// Qualified sub-page name
    pub page_name_sub: String,
}

/// Classification outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Record proceeds to transformation
    Accept(Admission),

    /// Record is dropped by the given rule
    Reject(Rule),
}

impl Verdict {
    /// Whether the record was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }
}

/// Applies the rule table to raw records
#[derive(Debug, Clone)]
pub struct Classifier {
    skip_names: HashSet<String>,
}

impl Classifier {
    /// Create a classifier with the given skip-list
    pub fn new<I, S>(skip_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_names: skip_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a classifier from normalizer configuration
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self::new(config.skip_names.iter().cloned())
    }

    /// Classify one record
    pub fn classify(&self, record: &RawRecord) -> Verdict {
        let view = RecordView::of(record);

        if let Some(rule) = Rule::ALL
            .iter()
            .find(|rule| rule.rejects(&view, &self.skip_names))
        {
            return Verdict::Reject(*rule);
        }

        // Both checks passed in the rule table above
        match (MonsterId::new(view.id as u32), positive_u32(view.hitpoints)) {
            (Some(id), Some(hitpoints)) => Verdict::Accept(Admission {
                id,
                hitpoints,
                version: (!view.version.is_empty()).then_some(view.version),
                page_name: view.page_name,
                page_name_sub: view.page_name_sub,
            }),
            (None, _) => Verdict::Reject(Rule::InvalidId),
            (_, None) => Verdict::Reject(Rule::NoHitpoints),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::from_config(&NormalizerConfig::default())
    }
}
