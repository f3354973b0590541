//! Bestiary CLI library.
//!
//! Wires the wiki fetchers and the normalizer into the `bestiary` commands,
//! along with configuration loading, output formatting and file assembly.

pub mod assemble;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
