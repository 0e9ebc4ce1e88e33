//! CLI command definitions.

pub mod articles;
pub mod authors;

use clap::{Parser, Subcommand, ValueEnum};

/// Operator CLI for the newsdesk article repository.
#[derive(Debug, Parser)]
#[command(name = "newsdesk")]
#[command(version, about = "Cache-aside article repository", long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Author management.
    Authors(authors::AuthorsCommand),
    /// Article management.
    Articles(articles::ArticlesCommand),
}
