//! Field coercers
//!
//! Each coercer maps a raw field of unknown shape to one strict type and
//! never fails: anything it cannot interpret becomes the supplied default.
//! Branching is on [`RawValue`] shape first, JSON type second.

use crate::strip::strip_str;
use bestiary_domain::RawValue;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Strings accepted as `true` (compared case-insensitively)
const TRUE_WORDS: [&str; 3] = ["true", "yes", "1"];

/// Placeholder list entries meaning "nothing here"
const PLACEHOLDERS: [&str; 2] = ["none", "n/a"];

static LEADING_DIGITS: OnceLock<Regex> = OnceLock::new();

fn leading_digits() -> &'static Regex {
    LEADING_DIGITS.get_or_init(|| Regex::new(r"^(\d+)").expect("leading digit pattern is valid"))
}

/// Coerce to a signed integer
///
/// Absent yields `default`; a list yields its first element (or `default`
/// when empty); numbers truncate toward zero; numeric strings parse after
/// trimming. Anything else yields `default`.
pub fn coerce_int(value: RawValue<'_>, default: i64) -> i64 {
    match value {
        RawValue::Absent => default,
        RawValue::List(items) => items.first().and_then(scalar_to_int).unwrap_or(default),
        RawValue::Scalar(v) => scalar_to_int(v).unwrap_or(default),
    }
}

/// Coerce to an unsigned integer, clamping negatives to 0
pub fn coerce_uint(value: RawValue<'_>, default: u32) -> u32 {
    let n = coerce_int(value, i64::from(default));
    n.clamp(0, i64::from(u32::MAX)) as u32
}

/// Coerce to a string
///
/// Absent yields `default`. A list yields its *last* element: list-valued
/// text fields are ordered oldest to newest, so the newest wins.
pub fn coerce_string(value: RawValue<'_>, default: &str) -> String {
    let picked = match value {
        RawValue::Absent => None,
        RawValue::List(items) => items.last().and_then(scalar_to_string),
        RawValue::Scalar(v) => scalar_to_string(v),
    };
    picked.unwrap_or_else(|| default.to_string())
}

/// Coerce to a boolean
///
/// Strings match `true`/`yes`/`1` case-insensitively; other values use
/// truthiness (non-zero numbers, non-empty lists and objects).
pub fn coerce_bool(value: RawValue<'_>, default: bool) -> bool {
    match value {
        RawValue::Absent => default,
        RawValue::List(items) => !items.is_empty(),
        RawValue::Scalar(Value::Bool(b)) => *b,
        RawValue::Scalar(Value::String(s)) => {
            let lowered = s.to_lowercase();
            TRUE_WORDS.contains(&lowered.as_str())
        }
        RawValue::Scalar(v) => is_truthy(v),
    }
}

/// Coerce a max hit
///
/// Accepts an integer, an annotated string such as `"97 (Melee)"` (the
/// leading digit run is used, saturating at `i64::MAX`; no leading digits
/// gives 0), or a list of
/// either. For a list the maximum of the coerced elements wins.
pub fn parse_max_hit(value: RawValue<'_>) -> i64 {
    match value {
        RawValue::Absent => 0,
        RawValue::List(items) => items
            .iter()
            .map(|item| parse_max_hit(RawValue::from(item)))
            .fold(0, i64::max),
        RawValue::Scalar(Value::Number(n)) => n.as_i64().unwrap_or(0),
        RawValue::Scalar(Value::Bool(b)) => i64::from(*b),
        RawValue::Scalar(Value::String(s)) => leading_digits()
            .captures(s.trim())
            .map(|caps| caps[1].parse::<i64>().unwrap_or(i64::MAX))
            .unwrap_or(0),
        RawValue::Scalar(_) => 0,
    }
}

/// Case handling for tag lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCase {
    /// Lowercase every entry (styles, attributes)
    Lower,
    /// Keep entries as written (category labels)
    Preserve,
}

/// Coerce to a list of tags
///
/// Absent yields an empty list and a bare scalar a one-element list.
/// Empty, falsy and placeholder (`none`, `n/a`) entries are dropped.
pub fn coerce_tags(value: RawValue<'_>, case: TagCase) -> Vec<String> {
    match value {
        RawValue::Absent => Vec::new(),
        RawValue::Scalar(v) => tag_entry(v, case).into_iter().collect(),
        RawValue::List(items) => items.iter().filter_map(|v| tag_entry(v, case)).collect(),
    }
}

/// Attack styles, lowercased
pub fn coerce_attack_styles(value: RawValue<'_>) -> Vec<String> {
    coerce_tags(value, TagCase::Lower)
}

/// Monster attributes, lowercased
pub fn coerce_attributes(value: RawValue<'_>) -> Vec<String> {
    coerce_tags(value, TagCase::Lower)
}

/// Slayer categories, case preserved
pub fn coerce_categories(value: RawValue<'_>) -> Vec<String> {
    coerce_tags(value, TagCase::Preserve)
}

fn tag_entry(value: &Value, case: TagCase) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    // Markers are case-sensitive, so they go before any case folding
    let text = match value {
        Value::String(s) => strip_str(s),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let lowered = text.to_lowercase();
    if lowered.is_empty() || PLACEHOLDERS.contains(&lowered.as_str()) {
        return None;
    }
    Some(match case {
        TagCase::Lower => text.to_lowercase(),
        TagCase::Preserve => text,
    })
}

fn scalar_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            ".{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..3)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// Property: coercers are total over arbitrary JSON
        #[test]
        fn test_coercers_total(value in arb_json()) {
            let shape = RawValue::from(&value);
            let _ = coerce_int(shape, 0);
            let _ = coerce_string(shape, "");
            let _ = coerce_bool(shape, false);
            let _ = parse_max_hit(shape);
            let _ = coerce_uint(shape, 1);
            for tag in coerce_attack_styles(shape) {
                prop_assert!(!tag.is_empty());
                prop_assert!(tag.trim() != "none" && tag.trim() != "n/a");
            }
        }

        /// Property: list max hit is never below any element's max hit
        #[test]
        fn test_max_hit_list_dominates(items in prop::collection::vec(0i64..10_000, 0..8)) {
            let value = Value::from(items.clone());
            let parsed = parse_max_hit(RawValue::from(&value));
            prop_assert_eq!(parsed, items.iter().copied().max().unwrap_or(0));
        }
    }
}
