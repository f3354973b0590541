//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use bestiary_domain::CanonicalMonster;
use colored::*;
use serde::Serialize;
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format monsters output.
    pub fn format_monsters(&self, monsters: &[&CanonicalMonster]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_monsters_json(monsters),
            OutputFormat::Table => self.format_monsters_table(monsters),
            OutputFormat::Quiet => self.format_monsters_quiet(monsters),
        }
    }

    /// Format monsters as JSON, one pretty document per monster.
    fn format_monsters_json(&self, monsters: &[&CanonicalMonster]) -> Result<String> {
        let documents = monsters
            .iter()
            .map(|m| to_sorted_json(m))
            .collect::<Result<Vec<_>>>()?;
        Ok(documents.join("\n"))
    }

    /// Format monsters as a table.
    fn format_monsters_table(&self, monsters: &[&CanonicalMonster]) -> Result<String> {
        if monsters.is_empty() {
            return Ok(self.colorize("No monsters found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Version", "Combat", "HP", "Max hit", "Styles", "Slayer", "Boss"]);

        for monster in monsters {
            builder.push_record([
                monster.id.to_string(),
                monster.name.clone(),
                monster.version.clone().unwrap_or_else(|| "-".to_string()),
                monster.combat_level.to_string(),
                monster.hitpoints.to_string(),
                monster.max_hit.to_string(),
                monster.attack_type.join(", "),
                yes_no(monster.slayer_monster).to_string(),
                yes_no(monster.boss).to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format monsters in quiet mode (IDs only).
    fn format_monsters_quiet(&self, monsters: &[&CanonicalMonster]) -> Result<String> {
        let ids: Vec<String> = monsters.iter().map(|m| m.id.to_string()).collect();
        Ok(ids.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Pretty JSON with object keys sorted at every depth.
pub fn to_sorted_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let value = sort_keys(serde_json::to_value(value)?);
    Ok(serde_json::to_string_pretty(&value)?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
