//! Monsters command implementation.

use crate::assemble::{write_monsters, write_raw};
use crate::cli::MonstersArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use bestiary_domain::{FilterMode, IndexSummary};
use bestiary_normalizer::{NormalizeOutput, Normalizer};
use bestiary_wiki::BucketClient;
use serde_json::Value;
use std::fs;
use tracing::{info, warn};

/// Entities printed by a dry run
pub const DRY_RUN_SAMPLE: usize = 3;

/// Execute the monsters command.
///
/// Returns the written index, or `None` for a dry run.
pub async fn execute_monsters(
    args: MonstersArgs,
    config: &Config,
    formatter: &Formatter,
    verbose: bool,
) -> Result<Option<IndexSummary>> {
    let mut normalizer_config = config.normalizer.clone();
    if let Some(filter) = args.filter.as_deref() {
        let mode = FilterMode::parse(filter).unwrap_or_else(|| {
            warn!(filter, "unknown filter mode, falling back to all");
            FilterMode::All
        });
        normalizer_config = normalizer_config.with_filter(mode);
    }
    let normalizer = Normalizer::new(normalizer_config)?;

    let records = match &args.input {
        Some(path) => {
            info!(path = %path.display(), "reading raw records");
            serde_json::from_str::<Value>(&fs::read_to_string(path)?)?
        }
        None => {
            let client = BucketClient::new(config.wiki.clone())?;
            Value::Array(client.fetch_monsters().await?)
        }
    };

    if let Some(path) = &args.save_raw {
        write_raw(path, &records)?;
        info!(path = %path.display(), "saved raw records");
    }

    let output = normalizer.run_value(records)?;
    report(&output, verbose);

    if args.dry_run {
        eprintln!("{}", formatter.info("Dry run - not writing files"));
        let sample: Vec<_> = output.mapping.iter().take(DRY_RUN_SAMPLE).collect();
        println!("{}", formatter.format_monsters(&sample)?);
        return Ok(None);
    }

    let out_dir = args
        .out_dir
        .unwrap_or_else(|| config.output.monsters_dir.clone());
    let index = write_monsters(&out_dir, &output.mapping, &normalizer.config().source_tag)?;

    eprintln!(
        "{}",
        formatter.success(&format!(
            "Wrote {} monster files to {}",
            index.count,
            out_dir.display()
        ))
    );
    Ok(Some(index))
}

fn report(output: &NormalizeOutput, verbose: bool) {
    eprintln!("{}", output.stats.summary());
    if verbose {
        eprintln!("{}", output.stats.report());
    }
}
