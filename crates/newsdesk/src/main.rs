//! newsdesk CLI entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk::cli::articles::ArticlesAction;
use newsdesk::cli::authors::AuthorsAction;
use newsdesk::cli::{Cli, Commands, OutputFormat};
use newsdesk::config::Config;
use newsdesk::output::{format_output, pretty};
use newsdesk::storage::CachedArticleRepository;
use newsdesk_core::article::{ArticleUpdate, Author, NewArticle};
use newsdesk_core::storage::ArticleRepository;

#[cfg(feature = "sqlite")]
type Store = newsdesk::storage::SqliteStore;
#[cfg(not(feature = "sqlite"))]
type Store = newsdesk::storage::InMemoryStore;

#[cfg(feature = "redis")]
type ArticleCache = newsdesk::cache::RedisCache;
#[cfg(not(feature = "redis"))]
type ArticleCache = newsdesk::cache::MemoryCache;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let store = Arc::new(open_store(&config).await?);
    let cache = Arc::new(open_cache(&config).await?);
    let repo = CachedArticleRepository::new(store.clone(), cache, config.cache_ttl())
        .with_key_prefix(config.cache_key_prefix.clone());

    let ctx = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(ctx.clone()));

    match cli.command {
        Commands::Authors(authors_cmd) => match authors_cmd.action {
            AuthorsAction::Add {
                first_name,
                last_name,
            } => {
                let author = Author::new(first_name, last_name);
                store.insert_author(&author).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&author, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_author(&author))
                    }
                }
            }
        },
        Commands::Articles(articles_cmd) => match articles_cmd.action {
            ArticlesAction::Create {
                author_id,
                title,
                content,
                category,
                image_url,
            } => {
                let mut draft = NewArticle::new(author_id, title, content, category);
                draft.image_url = image_url;
                let article = repo.create(&ctx, draft).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&article, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_article(&article))
                    }
                }
            }
            ArticlesAction::Get { id } => {
                let article = repo.get_by_id(&ctx, id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&article, cli.format)),
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_article_with_author(&article))
                    }
                }
            }
            ArticlesAction::Update {
                id,
                title,
                content,
                category,
                image_url,
            } => {
                let mut update = ArticleUpdate::new(id, title, content, category);
                update.image_url = image_url;
                let article = repo.update(&ctx, update).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&article, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Updated:\n{}", pretty::format_article(&article))
                    }
                }
            }
            ArticlesAction::Delete { id } => {
                repo.delete(&ctx, id).await?;
                if !cli.quiet {
                    println!("Deleted article {}", id);
                }
            }
            ArticlesAction::List { page } => {
                let list = repo.list(&ctx, page.pagination()?).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&list, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_article_list(&list)),
                }
            }
            ArticlesAction::Search { title, page } => {
                let list = repo
                    .search_by_title(&ctx, &title, page.pagination()?)
                    .await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&list, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_article_list(&list)),
                }
            }
        },
    }

    Ok(())
}

#[cfg(feature = "sqlite")]
async fn open_store(config: &Config) -> Result<Store> {
    tracing::info!(path = %config.sqlite_path, "Opening SQLite store");
    Store::new(&config.sqlite_path)
        .await
        .with_context(|| format!("failed to open {}", config.sqlite_path))
}

#[cfg(not(feature = "sqlite"))]
async fn open_store(_config: &Config) -> Result<Store> {
    tracing::info!("Using in-memory store; data is discarded on exit");
    Ok(Store::new())
}

#[cfg(feature = "redis")]
async fn open_cache(config: &Config) -> Result<ArticleCache> {
    tracing::info!(url = %config.redis_url, "Connecting to Redis cache");
    ArticleCache::new(&config.redis_url)
        .await
        .with_context(|| format!("failed to connect to {}", config.redis_url))
}

#[cfg(not(feature = "redis"))]
async fn open_cache(config: &Config) -> Result<ArticleCache> {
    tracing::debug!(max_entries = config.cache_max_entries, "Using in-process cache");
    Ok(ArticleCache::new(config.cache_max_entries)?)
}

/// Cancels `ctx` when the user presses Ctrl+C.
async fn cancel_on_ctrl_c(ctx: CancellationToken) {
    match signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C, cancelling...");
            ctx.cancel();
        }
        Err(err) => tracing::warn!(error = %err, "Failed to install Ctrl+C handler"),
    }
}
