//! Integration tests for the bestiary CLI commands, run offline.

use bestiary_cli::assemble::{entity_path, write_entities, write_monsters, INDEX_FILE};
use bestiary_cli::cli::MonstersArgs;
use bestiary_cli::commands::{execute_monsters, run_entity_pipeline, EntityJob};
use bestiary_cli::config::OutputFormat;
use bestiary_cli::{CliError, Config, Formatter};
use bestiary_domain::IndexSummary;
use bestiary_normalizer::Normalizer;
use bestiary_wiki::EntityKind;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn raw_records() -> Value {
    json!([
        {"page_name": "Abyssal demon", "page_name_sub": "Abyssal demon#Standard",
         "id": [415, 416], "hitpoints": 150, "combat_level": 124, "max_hit": 8,
         "attack_style": ["Stab"], "slayer_category": "Abyssal demons", "slayer_level": 85},
        {"page_name": "Abyssal demon", "page_name_sub": "Abyssal demon#Wilderness Slayer Cave",
         "id": 415, "hitpoints": 150, "combat_level": 124},
        {"page_name": "Vorkath", "page_name_sub": "Vorkath#Post-quest",
         "id": 8061, "hitpoints": 750, "combat_level": 732,
         "attribute": ["Dragon", "Undead", "Boss"]},
        {"page_name": "Vorkath", "page_name_sub": "Vorkath#Asleep",
         "id": 8059, "hitpoints": 750, "combat_level": 732},
        {"page_name": "Man", "page_name_sub": "Man",
         "id": 3106, "hitpoints": 7, "combat_level": 2}
    ])
}

fn write_input(dir: &Path) -> PathBuf {
    let path = dir.join("raw.json");
    fs::write(&path, serde_json::to_string(&raw_records()).unwrap()).unwrap();
    path
}

fn monsters_args(input: PathBuf, out_dir: PathBuf) -> MonstersArgs {
    MonstersArgs {
        out_dir: Some(out_dir),
        filter: None,
        dry_run: false,
        input: Some(input),
        save_raw: None,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn ids(index: &IndexSummary) -> Vec<u32> {
    index.ids.iter().map(|id| id.value()).collect()
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

#[tokio::test]
async fn test_monsters_from_saved_input() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("monsters");
    let args = monsters_args(write_input(dir.path()), out_dir.clone());

    let index = execute_monsters(args, &Config::default(), &quiet(), false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(ids(&index), vec![415, 3106, 8061]);
    assert_eq!(index.source, "osrs_wiki");

    let demon = read_json(&entity_path(&out_dir, 415));
    assert_eq!(demon["version"], "Standard");
    assert_eq!(demon["slayer_monster"], true);
    assert_eq!(demon["_wiki_page"], "Abyssal demon#Standard");

    let vorkath = read_json(&entity_path(&out_dir, 8061));
    assert_eq!(vorkath["boss"], true);
    assert!(!entity_path(&out_dir, 8059).exists());

    let written = read_json(&out_dir.join(INDEX_FILE));
    assert_eq!(written, json!({"count": 3, "ids": [415, 3106, 8061], "source": "osrs_wiki"}));
}

#[tokio::test]
async fn test_monsters_filter_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("bosses");
    let mut args = monsters_args(write_input(dir.path()), out_dir.clone());
    args.filter = Some("boss".to_string());

    let index = execute_monsters(args, &Config::default(), &quiet(), false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ids(&index), vec![8061]);
}

#[tokio::test]
async fn test_monsters_unknown_filter_keeps_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = monsters_args(write_input(dir.path()), dir.path().join("out"));
    args.filter = Some("dragons".to_string());

    let index = execute_monsters(args, &Config::default(), &quiet(), false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(index.count, 3);
}

#[tokio::test]
async fn test_monsters_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("monsters");
    let raw_copy = dir.path().join("copy").join("raw.json");
    let mut args = monsters_args(write_input(dir.path()), out_dir.clone());
    args.dry_run = true;
    args.save_raw = Some(raw_copy.clone());

    let index = execute_monsters(args, &Config::default(), &quiet(), true)
        .await
        .unwrap();
    assert!(index.is_none());
    assert!(!out_dir.exists());
    assert_eq!(read_json(&raw_copy), raw_records());
}

#[tokio::test]
async fn test_monsters_rejects_non_array_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.json");
    fs::write(&input, r#"{"bucket": []}"#).unwrap();

    let result = execute_monsters(
        monsters_args(input, dir.path().join("out")),
        &Config::default(),
        &quiet(),
        false,
    )
    .await;
    assert!(matches!(result, Err(CliError::Normalizer(_))));
}

#[test]
fn test_written_files_have_sorted_keys() {
    let dir = tempfile::tempdir().unwrap();
    let output = Normalizer::default().run_value(raw_records()).unwrap();
    write_monsters(dir.path(), &output.mapping, "osrs_wiki").unwrap();

    let text = fs::read_to_string(entity_path(dir.path(), 3106)).unwrap();
    let keys: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("  \""))
        .filter_map(|line| line.trim().split('"').nth(1))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&"_source"));
}

#[test]
fn test_write_entities() {
    let dir = tempfile::tempdir().unwrap();
    let mut entities = BTreeMap::new();
    let mut whip = Map::new();
    whip.insert("name".to_string(), json!("Abyssal whip"));
    whip.insert("id".to_string(), json!(4151));
    entities.insert(4151, whip);

    let out_dir = dir.path().join("items");
    assert_eq!(write_entities(&out_dir, &entities).unwrap(), 1);
    assert_eq!(
        read_json(&entity_path(&out_dir, 4151)),
        json!({"id": 4151, "name": "Abyssal whip"})
    );
}

fn unreachable_job(dir: &Path, whitelist: &str, allow_missing: bool) -> EntityJob {
    let path = dir.join("ids.txt");
    fs::write(&path, whitelist).unwrap();
    EntityJob {
        kind: EntityKind::Item,
        whitelist: path,
        base_url: "http://127.0.0.1:9/items-json".to_string(),
        out_dir: dir.join("items"),
        allow_missing,
    }
}

#[tokio::test]
async fn test_empty_whitelist_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let job = unreachable_job(dir.path(), "# nothing here\n\n", false);
    let result = run_entity_pipeline(&job, "test", &quiet()).await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[tokio::test]
async fn test_missing_entities_fail_unless_allowed() {
    let dir = tempfile::tempdir().unwrap();

    let job = unreachable_job(dir.path(), "4151\n11802\n", false);
    match run_entity_pipeline(&job, "test", &quiet()).await {
        Err(CliError::MissingEntities { kind, count, ids }) => {
            assert_eq!(kind, "items");
            assert_eq!(count, 2);
            assert_eq!(ids, "4151, 11802");
        }
        other => panic!("expected missing entities, got {:?}", other),
    }

    let job = unreachable_job(dir.path(), "4151\n11802\n", true);
    assert_eq!(run_entity_pipeline(&job, "test", &quiet()).await.unwrap(), 0);
}
