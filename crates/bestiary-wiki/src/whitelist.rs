//! Whitelist loading
//!
//! A whitelist names the entity IDs to fetch. Accepted forms:
//!
//! - `.json` file holding an array of IDs
//! - `.json` file holding an object with an `ids` array
//! - any other file: one ID per line, blank lines and `#` comments ignored
//!
//! Entries may be integers or numeric strings. Booleans are rejected even
//! though JSON parsers would happily treat them as numbers elsewhere.

use crate::{Result, WikiError};
use serde_json::Value;
use std::path::Path;

/// Load a whitelist file, returning sorted unique IDs
pub fn load_whitelist(path: &Path) -> Result<Vec<u32>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        WikiError::Whitelist(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let ids = if is_json {
        let value: Value = serde_json::from_str(&text).map_err(|e| {
            WikiError::Whitelist(format!("Invalid JSON in {}: {}", path.display(), e))
        })?;
        parse_json(&value)?
    } else {
        parse_text(&text)?
    };

    Ok(sorted_unique(ids))
}

/// IDs from a parsed JSON whitelist, in file order
pub fn parse_json(value: &Value) -> Result<Vec<u32>> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("ids") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(WikiError::Whitelist(
                    "Expected whitelist JSON to contain an 'ids' array".to_string(),
                ))
            }
        },
        _ => {
            return Err(WikiError::Whitelist(
                "Whitelist must be a JSON array or newline-delimited text".to_string(),
            ))
        }
    };

    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::Number(n) => ids.push(number_to_id(n)?),
            Value::String(s) => {
                if let Some(id) = text_to_id(s)? {
                    ids.push(id);
                }
            }
            other => {
                return Err(WikiError::Whitelist(format!(
                    "Whitelist entries must be integers or strings, found {}",
                    other
                )))
            }
        }
    }
    Ok(ids)
}

/// IDs from a newline-delimited whitelist, in file order
pub fn parse_text(text: &str) -> Result<Vec<u32>> {
    let mut ids = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(id) = text_to_id(line)? {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Sort and de-duplicate
pub fn sorted_unique(mut ids: Vec<u32>) -> Vec<u32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn number_to_id(n: &serde_json::Number) -> Result<u32> {
    n.as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| WikiError::Whitelist(format!("Invalid entity ID: {}", n)))
}

fn text_to_id(s: &str) -> Result<Option<u32>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<u32>()
        .map(Some)
        .map_err(|_| WikiError::Whitelist(format!("Invalid entity ID: {:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_json_array() {
        assert_eq!(parse_json(&json!([4151, "11840", " 1 ", ""])).unwrap(), vec![4151, 11840, 1]);
    }

    #[test]
    fn test_parse_json_object_with_ids() {
        assert_eq!(parse_json(&json!({"ids": [2, 1]})).unwrap(), vec![2, 1]);
        assert!(parse_json(&json!({"items": [1]})).is_err());
    }

    #[test]
    fn test_booleans_rejected() {
        assert!(parse_json(&json!([1, true])).is_err());
    }

    #[test]
    fn test_bad_entries_rejected() {
        assert!(parse_json(&json!([1.5])).is_err());
        assert!(parse_json(&json!([-3])).is_err());
        assert!(parse_json(&json!(["abc"])).is_err());
        assert!(parse_json(&json!([null])).is_err());
        assert!(parse_json(&json!("12")).is_err());
    }

    #[test]
    fn test_parse_text_skips_comments() {
        let text = "# weapons\n4151\n\n  11840  \n# armour\n1127\n";
        assert_eq!(parse_text(text).unwrap(), vec![4151, 11840, 1127]);
        assert!(parse_text("12\nnope\n").is_err());
    }

    #[test]
    fn test_load_sorts_and_dedups() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("ids.JSON");
        std::fs::write(&json_path, "[30, 10, 20, 10]").unwrap();
        assert_eq!(load_whitelist(&json_path).unwrap(), vec![10, 20, 30]);

        let text_path = dir.path().join("ids.txt");
        let mut file = std::fs::File::create(&text_path).unwrap();
        writeln!(file, "# monsters\n415\n2\n415").unwrap();
        assert_eq!(load_whitelist(&text_path).unwrap(), vec![2, 415]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_whitelist(Path::new("/nonexistent/ids.json")).unwrap_err();
        assert!(matches!(err, WikiError::Whitelist(_)));
    }
}
