use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Pagination;

/// A person who writes articles.
///
/// Authors are owned by an external identity system; the article store only
/// keeps what it needs to render a byline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Creates a new author with a random ID.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Sets a specific ID for this author (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns the byline shown next to an article.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A persisted article.
///
/// `id`, `created_at` and `updated_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    /// Immutable after creation.
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
}

impl NewArticle {
    /// Creates a new article draft without an image.
    pub fn new(
        author_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            author_id,
            title: title.into(),
            content: content.into(),
            image_url: None,
            category: category.into(),
        }
    }

    /// Sets the image URL for this draft.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Materializes the draft into an article, as a store does on insert.
    pub fn into_article(self, id: Uuid, now: DateTime<Utc>) -> Article {
        Article {
            id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The mutable fields of an article, addressed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
}

impl ArticleUpdate {
    /// Creates an update that replaces every mutable field of `id`.
    pub fn new(
        id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            image_url: None,
            category: category.into(),
        }
    }

    /// Sets the image URL for this update.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Applies the update to `article`, bumping `updated_at`.
    pub fn apply_to(&self, article: &mut Article, now: DateTime<Utc>) {
        article.title = self.title.clone();
        article.content = self.content.clone();
        article.image_url = self.image_url.clone();
        article.category = self.category.clone();
        article.updated_at = now;
    }
}

/// An article joined with its author's byline.
///
/// This is the read model served by single-article lookups and the only
/// value ever written to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleWithAuthor {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleWithAuthor {
    /// Joins an article with its author's display name.
    pub fn from_parts(article: Article, author: impl Into<String>) -> Self {
        Self {
            id: article.id,
            author_id: article.author_id,
            author: author.into(),
            title: article.title,
            content: article.content,
            image_url: article.image_url,
            category: article.category,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// One page of articles plus the totals needed to navigate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleList {
    /// Rows matching the query when the count ran.
    pub total_count: u64,
    pub total_pages: u64,
    /// 1-based page number, echoed from the request.
    pub page: u32,
    /// Page size, echoed from the request.
    pub size: u32,
    pub has_more: bool,
    pub articles: Vec<Article>,
}

impl ArticleList {
    /// Wraps one page of rows with totals derived from `total_count`.
    pub fn new(pagination: Pagination, total_count: u64, articles: Vec<Article>) -> Self {
        Self {
            total_count,
            total_pages: pagination.total_pages(total_count),
            page: pagination.page(),
            size: pagination.size(),
            has_more: pagination.has_more(total_count),
            articles,
        }
    }
}
