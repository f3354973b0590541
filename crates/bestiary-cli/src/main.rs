//! Bestiary CLI - fetch, normalize and write wiki monster data.

use bestiary_cli::commands;
use bestiary_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> bestiary_cli::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for printed entities
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Monsters(args) => {
            commands::execute_monsters(args, &config, &formatter, cli.verbose).await?;
        }
        Command::Entities(args) => {
            commands::execute_entities(args, &config, &formatter).await?;
        }
        Command::IngestAll(args) => {
            commands::execute_ingest_all(args, &config, &formatter).await?;
        }
    }

    Ok(())
}
