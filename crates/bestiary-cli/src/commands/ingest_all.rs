//! Ingest-all command implementation.

use super::entities::{run_entity_pipeline, EntityJob};
use crate::cli::IngestAllArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use bestiary_wiki::EntityKind;
use tracing::info;

/// Build the items and monsters jobs from configuration.
///
/// Both base URLs are resolved up front so a bad monsters setting fails
/// before any items are fetched.
pub fn plan(config: &Config, allow_missing: bool) -> Result<[EntityJob; 2]> {
    let settings = &config.entities;
    let allow_missing = allow_missing || settings.allow_missing;

    let items = EntityJob {
        kind: EntityKind::Item,
        whitelist: settings.whitelist.clone(),
        base_url: settings.items_base_url()?,
        out_dir: settings.out_dir.clone(),
        allow_missing,
    };
    let monsters = EntityJob {
        kind: EntityKind::Monster,
        whitelist: settings.monsters_whitelist.clone(),
        base_url: settings.monsters_base_url()?,
        out_dir: settings.monsters_out_dir.clone(),
        allow_missing,
    };
    Ok([items, monsters])
}

/// Execute the ingest-all command.
pub async fn execute_ingest_all(
    args: IngestAllArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    for job in plan(config, args.allow_missing)? {
        info!(kind = %job.kind, base_url = %job.base_url, "ingesting whitelist");
        run_entity_pipeline(&job, &config.wiki.user_agent, formatter).await?;
    }
    Ok(())
}
