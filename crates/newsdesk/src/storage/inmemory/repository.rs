//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use newsdesk_core::article::{Article, ArticleUpdate, ArticleWithAuthor, Author, NewArticle};
use newsdesk_core::storage::{ArticleStore, RepositoryError, Result};

use crate::storage::store_timestamp;

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the store is dropped.
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    articles: Arc<RwLock<HashMap<Uuid, Article>>>,
    authors: Arc<RwLock<HashMap<Uuid, Author>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an author so articles can reference it.
    pub async fn insert_author(&self, author: &Author) -> Result<()> {
        let mut authors = self.authors.write().await;
        if authors.contains_key(&author.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Author",
                id: author.id.to_string(),
            });
        }
        authors.insert(author.id, author.clone());
        Ok(())
    }

    /// Returns matching articles in `(created_at, id)` order.
    async fn sorted_matching(&self, title: Option<&str>) -> Vec<Article> {
        let needle = title.map(str::to_lowercase);
        let articles = self.articles.read().await;
        let mut matching: Vec<Article> = articles
            .values()
            .filter(|a| match &needle {
                Some(needle) => a.title.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        matching
    }
}

/// Applies `offset`/`limit` to an ordered row set.
fn page_of(rows: Vec<Article>, offset: u64, limit: u64) -> Vec<Article> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl ArticleStore for InMemoryStore {
    async fn insert_article(&self, article: &NewArticle) -> Result<Article> {
        if !self.authors.read().await.contains_key(&article.author_id) {
            return Err(RepositoryError::InvalidData(format!(
                "Unknown author {} for Article",
                article.author_id
            )));
        }

        let created = article
            .clone()
            .into_article(Uuid::new_v4(), store_timestamp());
        let mut articles = self.articles.write().await;
        articles.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_article(&self, update: &ArticleUpdate) -> Result<Option<Article>> {
        let mut articles = self.articles.write().await;
        Ok(articles.get_mut(&update.id).map(|article| {
            update.apply_to(article, store_timestamp());
            article.clone()
        }))
    }

    async fn delete_article(&self, id: Uuid) -> Result<u64> {
        let mut articles = self.articles.write().await;
        Ok(u64::from(articles.remove(&id).is_some()))
    }

    async fn get_article_with_author(&self, id: Uuid) -> Result<Option<ArticleWithAuthor>> {
        let Some(article) = self.articles.read().await.get(&id).cloned() else {
            return Ok(None);
        };
        // Same as the SQL inner join: no author, no row.
        let authors = self.authors.read().await;
        Ok(authors
            .get(&article.author_id)
            .map(|author| ArticleWithAuthor::from_parts(article, author.display_name())))
    }

    async fn count_articles(&self) -> Result<u64> {
        Ok(self.articles.read().await.len() as u64)
    }

    async fn list_articles(&self, offset: u64, limit: u64) -> Result<Vec<Article>> {
        Ok(page_of(self.sorted_matching(None).await, offset, limit))
    }

    async fn count_articles_by_title(&self, title: &str) -> Result<u64> {
        Ok(self.sorted_matching(Some(title)).await.len() as u64)
    }

    async fn search_articles_by_title(
        &self,
        title: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Article>> {
        Ok(page_of(
            self.sorted_matching(Some(title)).await,
            offset,
            limit,
        ))
    }
}
