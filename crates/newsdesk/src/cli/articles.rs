//! Article CLI commands.

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use newsdesk_core::storage::{Pagination, PaginationError, DEFAULT_PAGE_SIZE};

/// Article management commands.
#[derive(Debug, Parser)]
pub struct ArticlesCommand {
    #[command(subcommand)]
    pub action: ArticlesAction,
}

/// Page selection shared by list and search.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Articles per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

impl PageArgs {
    /// Validates the arguments into a `Pagination`.
    pub fn pagination(&self) -> Result<Pagination, PaginationError> {
        Pagination::new(self.page, self.size)
    }
}

/// Available article actions.
#[derive(Debug, Subcommand)]
pub enum ArticlesAction {
    /// Create a new article.
    Create {
        /// Author ID.
        #[arg(long)]
        author_id: Uuid,
        /// Article title.
        #[arg(long)]
        title: String,
        /// Article body.
        #[arg(long)]
        content: String,
        /// Article category.
        #[arg(long)]
        category: String,
        /// Optional image URL.
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Get article by ID.
    Get {
        /// Article ID.
        id: Uuid,
    },
    /// Replace the editable fields of an article.
    Update {
        /// Article ID.
        id: Uuid,
        /// New title.
        #[arg(long)]
        title: String,
        /// New body.
        #[arg(long)]
        content: String,
        /// New category.
        #[arg(long)]
        category: String,
        /// New image URL. Omit to clear it.
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete article by ID.
    Delete {
        /// Article ID.
        id: Uuid,
    },
    /// List articles page by page.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Search articles by title substring.
    Search {
        /// Case-insensitive title substring.
        title: String,
        #[command(flatten)]
        page: PageArgs,
    },
}
