//! Entities command implementation.

use crate::assemble::write_entities;
use crate::cli::EntitiesArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use bestiary_wiki::{load_whitelist, EntityFetcher, EntityKind};
use std::path::PathBuf;

/// One whitelist fetch: which IDs, from where, to where.
#[derive(Debug, Clone)]
pub struct EntityJob {
    /// Entity kind
    pub kind: EntityKind,
    /// Whitelist path
    pub whitelist: PathBuf,
    /// Mirror base URL
    pub base_url: String,
    /// Output directory
    pub out_dir: PathBuf,
    /// Allow missing IDs instead of failing
    pub allow_missing: bool,
}

/// Execute the entities command.
pub async fn execute_entities(
    args: EntitiesArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<usize> {
    let kind = EntityKind::from(args.kind);
    let out_dir = args.out_dir.unwrap_or_else(|| match kind {
        EntityKind::Item => config.entities.out_dir.clone(),
        EntityKind::Monster => config.entities.monsters_out_dir.clone(),
    });

    let job = EntityJob {
        kind,
        whitelist: args.whitelist,
        base_url: args.base_url,
        out_dir,
        allow_missing: args.allow_missing || config.entities.allow_missing,
    };
    run_entity_pipeline(&job, &config.wiki.user_agent, formatter).await
}

/// Load the whitelist, fetch every ID and write what was found.
///
/// Fails on an empty whitelist, and on missing IDs unless the job allows
/// them. Found entities are written either way.
pub async fn run_entity_pipeline(
    job: &EntityJob,
    user_agent: &str,
    formatter: &Formatter,
) -> Result<usize> {
    let ids = load_whitelist(&job.whitelist)?;
    if ids.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Whitelist is empty: {}",
            job.whitelist.display()
        )));
    }

    let fetcher = EntityFetcher::new(&job.base_url, job.kind, user_agent)?;
    let batch = fetcher.fetch_all(&ids).await;
    let written = write_entities(&job.out_dir, &batch.entities)?;

    let mut message = format!(
        "Wrote {} {} to {}",
        written,
        job.kind.plural(),
        job.out_dir.display()
    );
    if batch.is_complete() {
        eprintln!("{}", formatter.success(&message));
        return Ok(written);
    }

    message.push_str(&format!(" (missing {} IDs)", batch.missing.len()));
    eprintln!("{}", formatter.warning(&message));

    if job.allow_missing {
        Ok(written)
    } else {
        Err(CliError::missing(job.kind.plural(), &batch.missing))
    }
}
