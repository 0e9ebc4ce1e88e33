//! SQLite store implementation.
//!
//! Implements `ArticleStore` from `newsdesk_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use newsdesk_core::article::{Article, ArticleUpdate, ArticleWithAuthor, Author, NewArticle};
use newsdesk_core::storage::{ArticleStore, RepositoryError, Result};

use super::conversions::{format_datetime, like_pattern, row_to_article, row_to_article_with_author};
use super::error::map_sqlite_error;
use super::schema;
use crate::storage::store_timestamp;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Converts a row offset or limit to SQLite's signed integer.
fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// SQLite-based article store.
///
/// Provides async access to SQLite storage for articles and their authors.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new store with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new store with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Registers an author so articles can reference it.
    pub async fn insert_author(&self, author: &Author) -> Result<()> {
        let id = author.id.to_string();
        let first_name = author.first_name.clone();
        let last_name = author.last_name.clone();
        let author_id = id.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_AUTHOR,
                    rusqlite::params![id, first_name, last_name],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Author", Some(&author_id)))
    }

    /// Runs a paged article query bound to `params`.
    async fn query_articles<P>(&self, sql: &'static str, params: P) -> Result<Vec<Article>>
    where
        P: rusqlite::Params + Send + 'static,
    {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = stmt.query_map(params, row_to_article).map_err(wrap_err)?;

                let mut articles = Vec::new();
                for row_result in rows {
                    articles.push(row_result.map_err(wrap_err)?);
                }
                Ok(articles)
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Article", None))
    }

    /// Runs a `COUNT(*)` query bound to `params`.
    async fn query_count<P>(&self, sql: &'static str, params: P) -> Result<u64>
    where
        P: rusqlite::Params + Send + 'static,
    {
        let count: i64 = self
            .conn
            .call(move |conn| {
                conn.query_row(sql, params, |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Article", None))?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::InvalidData(format!("Negative row count: {count}")))
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn insert_article(&self, article: &NewArticle) -> Result<Article> {
        let created = article
            .clone()
            .into_article(Uuid::new_v4(), store_timestamp());

        let id = created.id.to_string();
        let author_id = created.author_id.to_string();
        let title = created.title.clone();
        let content = created.content.clone();
        let image_url = created.image_url.clone();
        let category = created.category.clone();
        let created_at = format_datetime(&created.created_at);
        let updated_at = format_datetime(&created.updated_at);
        let article_id = id.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_ARTICLE,
                    rusqlite::params![
                        id, author_id, title, content, image_url, category, created_at,
                        updated_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Article", Some(&article_id)))?;

        Ok(created)
    }

    async fn update_article(&self, update: &ArticleUpdate) -> Result<Option<Article>> {
        let id = update.id.to_string();
        let title = update.title.clone();
        let content = update.content.clone();
        let image_url = update.image_url.clone();
        let category = update.category.clone();
        let updated_at = format_datetime(&store_timestamp());
        let article_id = id.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::UPDATE_ARTICLE).map_err(wrap_err)?;
                match stmt.query_row(
                    rusqlite::params![id, title, content, image_url, category, updated_at],
                    row_to_article,
                ) {
                    Ok(article) => Ok(Some(article)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Article", Some(&article_id)))
    }

    async fn delete_article(&self, id: Uuid) -> Result<u64> {
        let id_str = id.to_string();

        let rows = self
            .conn
            .call(move |conn| {
                conn.execute(schema::DELETE_ARTICLE, [&id_str])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Article", Some(&id.to_string())))?;

        Ok(rows as u64)
    }

    async fn get_article_with_author(&self, id: Uuid) -> Result<Option<ArticleWithAuthor>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ARTICLE_WITH_AUTHOR)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_article_with_author) {
                    Ok(article) => Ok(Some(article)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_sqlite_error(e, "Article", Some(&id.to_string())))
    }

    async fn count_articles(&self) -> Result<u64> {
        self.query_count(schema::COUNT_ARTICLES, ()).await
    }

    async fn list_articles(&self, offset: u64, limit: u64) -> Result<Vec<Article>> {
        self.query_articles(
            schema::SELECT_ARTICLES_PAGE,
            (to_sql_int(offset), to_sql_int(limit)),
        )
        .await
    }

    async fn count_articles_by_title(&self, title: &str) -> Result<u64> {
        self.query_count(schema::COUNT_ARTICLES_BY_TITLE, (like_pattern(title),))
            .await
    }

    async fn search_articles_by_title(
        &self,
        title: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Article>> {
        self.query_articles(
            schema::SELECT_ARTICLES_BY_TITLE_PAGE,
            (like_pattern(title), to_sql_int(offset), to_sql_int(limit)),
        )
        .await
    }
}
