//! Tag stripper - removes wiki parser-artifact markers
//!
//! The wiki's parser leaves opaque `UNIQ--<name>-<hex8>-QINU` tokens in
//! rendered field values, sometimes wrapped in stray quote characters.
//! Stripping walks arbitrarily nested values, rewrites every string, and
//! leaves key order, element order and non-string scalars untouched.

use bestiary_domain::CanonicalMonster;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static MARKER: OnceLock<Regex> = OnceLock::new();

fn marker() -> &'static Regex {
    MARKER.get_or_init(|| {
        Regex::new(r#"['"`]*UNIQ--[a-zA-Z0-9]+-[0-9A-F]{8}-QINU['"`]*"#)
            .expect("parser marker pattern is valid")
    })
}

/// Remove every marker token from a string and trim the result
pub fn strip_str(s: &str) -> String {
    marker().replace_all(s, "").trim().to_string()
}

/// Values that can have parser markers stripped from their strings
pub trait StripTags: Sized {
    /// Return the value with every contained string stripped
    fn strip_tags(self) -> Self;
}

impl StripTags for String {
    fn strip_tags(self) -> Self {
        strip_str(&self)
    }
}

impl<T: StripTags> StripTags for Option<T> {
    fn strip_tags(self) -> Self {
        self.map(StripTags::strip_tags)
    }
}

impl<T: StripTags> StripTags for Vec<T> {
    fn strip_tags(self) -> Self {
        self.into_iter().map(StripTags::strip_tags).collect()
    }
}

impl StripTags for Value {
    fn strip_tags(self) -> Self {
        match self {
            Value::String(s) => Value::String(strip_str(&s)),
            Value::Array(items) => Value::Array(items.strip_tags()),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.strip_tags()))
                    .collect(),
            ),
            other => other,
        }
    }
}

impl StripTags for CanonicalMonster {
    fn strip_tags(self) -> Self {
        Self {
            name: self.name.strip_tags(),
            version: self.version.strip_tags(),
            attack_type: self.attack_type.strip_tags(),
            attributes: self.attributes.strip_tags(),
            category: self.category.strip_tags(),
            elemental_weakness: self.elemental_weakness.strip_tags(),
            source: self.source.strip_tags(),
            wiki_page: self.wiki_page.strip_tags(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = "UNIQ--nowiki-0000001A-QINU";

    #[test]
    fn test_strip_plain_token() {
        let input = format!("Giant rat {}", TOKEN);
        assert_eq!(strip_str(&input), "Giant rat");
    }

    #[test]
    fn test_strip_quoted_token() {
        let input = format!("  '\"{}\"' Melee ", TOKEN);
        let stripped = strip_str(&input);
        assert_eq!(stripped, "Melee");
        assert!(!stripped.contains("UNIQ"));
        assert!(!stripped.contains("QINU"));
    }

    #[test]
    fn test_strip_leaves_lookalikes() {
        // lowercase hex does not match the marker format
        let input = "UNIQ--ref-0000001a-QINU";
        assert_eq!(strip_str(input), input);
    }

    #[test]
    fn test_strip_nested_value() {
        let value = json!({
            "b": [format!("x{}", TOKEN), 3, {"c": format!(" {} y ", TOKEN)}],
            "a": true,
            "n": null
        });
        let stripped = value.strip_tags();
        assert_eq!(
            stripped,
            json!({"a": true, "b": ["x", 3, {"c": "y"}], "n": null})
        );
    }

    #[test]
    fn test_strip_preserves_list_order() {
        let value = json!(["c", "b", "a"]);
        assert_eq!(value.clone().strip_tags(), value);
    }

    #[test]
    fn test_strip_option_and_vec() {
        let version: Option<String> = Some(format!("Hard{}", TOKEN));
        assert_eq!(version.strip_tags().as_deref(), Some("Hard"));

        let tags = vec![format!("{} crush", TOKEN), "stab".to_string()];
        assert_eq!(tags.strip_tags(), vec!["crush", "stab"]);
    }
}
