//! Author CLI commands.

use clap::{Parser, Subcommand};

/// Author management commands.
#[derive(Debug, Parser)]
pub struct AuthorsCommand {
    #[command(subcommand)]
    pub action: AuthorsAction,
}

/// Available author actions.
#[derive(Debug, Subcommand)]
pub enum AuthorsAction {
    /// Register a new author.
    Add {
        /// Author first name.
        #[arg(long)]
        first_name: String,
        /// Author last name.
        #[arg(long)]
        last_name: String,
    },
}
