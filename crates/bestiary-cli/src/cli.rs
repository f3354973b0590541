//! CLI command definitions and argument parsing.

use bestiary_wiki::EntityKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bestiary - Ingest and normalize monster data from the wiki.
#[derive(Debug, Parser)]
#[command(name = "bestiary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format for printed entities
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BESTIARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics (rejections, duplicates) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format
    Table,
    /// JSON format (default)
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch, normalize and write monsters from the wiki bucket API
    Monsters(MonstersArgs),

    /// Fetch whitelisted item or monster JSON from a mirror
    Entities(EntitiesArgs),

    /// Run the items then monsters whitelist pipelines from config
    IngestAll(IngestAllArgs),
}

/// Arguments for the monsters command.
#[derive(Debug, Parser)]
pub struct MonstersArgs {
    /// Output directory for per-monster JSON files
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Role filter: all, slayer, boss, slayer+boss (unknown values mean all)
    #[arg(long)]
    pub filter: Option<String>,

    /// Fetch and process but don't write files
    #[arg(long)]
    pub dry_run: bool,

    /// Normalize a saved JSON array of raw records instead of fetching
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the fetched raw records to this file
    #[arg(long)]
    pub save_raw: Option<PathBuf>,
}

/// Arguments for the entities command.
#[derive(Debug, Parser)]
pub struct EntitiesArgs {
    /// Whitelist path (JSON array/object or newline-delimited text)
    #[arg(short, long)]
    pub whitelist: PathBuf,

    /// Base URL of the mirror (ending with items-json or monsters-json)
    #[arg(short, long)]
    pub base_url: String,

    /// Output directory for per-entity JSON files
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Entity kind, for labels and ID checks
    #[arg(short, long, value_enum, default_value = "item")]
    pub kind: KindArg,

    /// Allow missing IDs instead of failing
    #[arg(long)]
    pub allow_missing: bool,
}

/// Arguments for the ingest-all command.
#[derive(Debug, Parser)]
pub struct IngestAllArgs {
    /// Allow missing IDs instead of failing
    #[arg(long)]
    pub allow_missing: bool,
}

/// Entity kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    /// Items
    Item,
    /// Monsters
    Monster,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Item => EntityKind::Item,
            KindArg::Monster => EntityKind::Monster,
        }
    }
}
