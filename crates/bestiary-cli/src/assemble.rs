//! Output assembler
//!
//! Writes one pretty, key-sorted JSON file per entity plus, for monsters,
//! an `_index.json` summary of the run.

use crate::error::Result;
use crate::output::to_sorted_json;
use bestiary_domain::{EntityMapping, IndexSummary};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the summary index
pub const INDEX_FILE: &str = "_index.json";

/// Where per-entity files of `id` go
pub fn entity_path(out_dir: &Path, id: impl std::fmt::Display) -> PathBuf {
    out_dir.join(format!("{}.json", id))
}

/// Write every monster and the summary index, returning the index
pub fn write_monsters(out_dir: &Path, mapping: &EntityMapping, source: &str) -> Result<IndexSummary> {
    fs::create_dir_all(out_dir)?;

    for monster in mapping.iter() {
        let path = entity_path(out_dir, monster.id);
        fs::write(&path, to_sorted_json(monster)?)?;
        debug!(path = %path.display(), name = %monster.label(), "wrote monster");
    }

    let index = mapping.index(source);
    fs::write(
        out_dir.join(INDEX_FILE),
        serde_json::to_string_pretty(&index)?,
    )?;
    Ok(index)
}

/// Write fetched whitelist entities, returning how many were written
pub fn write_entities(out_dir: &Path, entities: &BTreeMap<u32, Map<String, Value>>) -> Result<usize> {
    fs::create_dir_all(out_dir)?;

    for (id, entity) in entities {
        fs::write(entity_path(out_dir, id), to_sorted_json(entity)?)?;
    }
    Ok(entities.len())
}

/// Write raw records for later offline runs
pub fn write_raw(path: &Path, records: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(records)?)?;
    Ok(())
}
