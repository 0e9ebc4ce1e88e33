use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::article::{Article, ArticleList, ArticleUpdate, ArticleWithAuthor, NewArticle};

use super::{Pagination, Result};

/// Durable article persistence.
///
/// Implementations report "no such row" through `Option` or row counts
/// rather than errors; translating those into `NotFound` is the repository's
/// job. Dropping a returned future abandons the underlying query.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Inserts an article, assigning its ID and timestamps.
    async fn insert_article(&self, article: &NewArticle) -> Result<Article>;

    /// Replaces the mutable fields of an article.
    ///
    /// Returns `None` when no row matched `update.id`.
    async fn update_article(&self, update: &ArticleUpdate) -> Result<Option<Article>>;

    /// Deletes an article and returns the number of rows affected.
    async fn delete_article(&self, id: Uuid) -> Result<u64>;

    /// Gets an article joined with its author's display name.
    async fn get_article_with_author(&self, id: Uuid) -> Result<Option<ArticleWithAuthor>>;

    /// Counts all articles.
    async fn count_articles(&self) -> Result<u64>;

    /// Lists articles ordered by `(created_at, id)`.
    async fn list_articles(&self, offset: u64, limit: u64) -> Result<Vec<Article>>;

    /// Counts articles whose title contains `title`, ignoring case.
    async fn count_articles_by_title(&self, title: &str) -> Result<u64>;

    /// Lists articles whose title contains `title`, ignoring case, ordered by
    /// `(created_at, id)`.
    async fn search_articles_by_title(
        &self,
        title: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Article>>;
}

/// Article operations exposed to callers.
///
/// Every operation takes the caller's cancellation token first; a fired
/// token fails the call with `RepositoryError::Cancelled`.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Creates an article.
    async fn create(&self, ctx: &CancellationToken, article: NewArticle) -> Result<Article>;

    /// Updates the mutable fields of an existing article.
    async fn update(&self, ctx: &CancellationToken, update: ArticleUpdate) -> Result<Article>;

    /// Gets a single article with its author.
    async fn get_by_id(&self, ctx: &CancellationToken, id: Uuid) -> Result<ArticleWithAuthor>;

    /// Deletes an article.
    async fn delete(&self, ctx: &CancellationToken, id: Uuid) -> Result<()>;

    /// Lists one page of articles.
    async fn list(&self, ctx: &CancellationToken, pagination: Pagination) -> Result<ArticleList>;

    /// Lists one page of articles whose title contains `title`.
    async fn search_by_title(
        &self,
        ctx: &CancellationToken,
        title: &str,
        pagination: Pagination,
    ) -> Result<ArticleList>;
}
