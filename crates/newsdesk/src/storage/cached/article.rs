//! Cached article repository decorator.
//!
//! Wraps an `ArticleStore` implementation with the cache-aside pattern.
//! Only single-article reads are cached; listings always hit the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use newsdesk_core::article::{Article, ArticleList, ArticleUpdate, ArticleWithAuthor, NewArticle};
use newsdesk_core::cache::{
    article_key, deserialize_article, serialize_article, Cache, CacheError,
    Result as CacheResult, DEFAULT_ARTICLE_KEY_PREFIX,
};
use newsdesk_core::storage::{
    ArticleRepository, ArticleStore, Pagination, RepositoryError, Result,
};

/// Runs `fut` unless `ctx` fires first.
///
/// The losing future is dropped, which abandons the in-flight store query.
async fn cancellable<F>(ctx: &CancellationToken, fut: F) -> Result<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(RepositoryError::Cancelled),
        out = fut => Ok(out),
    }
}

/// Runs a cache call unless `ctx` fires first.
///
/// Cancellation surfaces as `CacheError::Cancelled`, so callers handle it
/// alongside every other cache failure.
async fn cache_call<F, T>(ctx: &CancellationToken, fut: F) -> CacheResult<T>
where
    F: Future<Output = CacheResult<T>>,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(CacheError::Cancelled),
        out = fut => out,
    }
}

/// Cached article repository decorator.
///
/// Implements the cache-aside pattern:
/// - **Reads by id**: Check cache first, on miss fetch from the store and populate cache
/// - **Writes**: Persist to the store, then invalidate the article's cache entry
/// - **Listings**: Always served by the store
///
/// Cache failures are logged at `warn` and never returned to the caller. Once
/// the store has answered, a cancelled cache call is just another cache
/// failure: the committed write or fetched article is still returned.
///
/// # Type Parameters
///
/// * `S` - The underlying store implementation
/// * `C` - The cache implementation
pub struct CachedArticleRepository<S, C>
where
    S: ArticleStore,
    C: Cache,
{
    store: Arc<S>,
    cache: Arc<C>,
    key_prefix: String,
    ttl: Duration,
}

impl<S, C> CachedArticleRepository<S, C>
where
    S: ArticleStore,
    C: Cache,
{
    /// Creates a new cached article repository.
    ///
    /// # Arguments
    ///
    /// * `store` - The underlying store to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for every cached article
    pub fn new(store: Arc<S>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            store,
            cache,
            key_prefix: DEFAULT_ARTICLE_KEY_PREFIX.to_string(),
            ttl,
        }
    }

    /// Sets the prefix prepended to every cache key.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn cache_key(&self, id: Uuid) -> String {
        article_key(&self.key_prefix, id)
    }

    /// Drops the cached copy of an article after a successful write.
    async fn invalidate(&self, ctx: &CancellationToken, id: Uuid) {
        let cache_key = self.cache_key(id);
        if let Err(err) = cache_call(ctx, self.cache.delete(&cache_key)).await {
            tracing::warn!(article_id = %id, error = %err, "Failed to invalidate article cache");
        }
    }

    /// Looks up a cached article, treating every cache failure as a miss.
    ///
    /// Cancellation is the exception: nothing has reached the store yet, so
    /// the whole operation is abandoned.
    async fn cached(&self, ctx: &CancellationToken, id: Uuid) -> Result<Option<ArticleWithAuthor>> {
        let cache_key = self.cache_key(id);
        let lookup = cache_call(ctx, self.cache.get(&cache_key))
            .await
            .and_then(|hit| {
                hit.map(|bytes| deserialize_article(&bytes).map_err(CacheError::from))
                    .transpose()
            });

        match lookup {
            Ok(Some(article)) => {
                tracing::trace!(article_id = %id, "Cache hit for article");
                Ok(Some(article))
            }
            Ok(None) => {
                tracing::trace!(article_id = %id, "Cache miss for article");
                Ok(None)
            }
            Err(CacheError::Cancelled) => Err(RepositoryError::Cancelled),
            Err(err) => {
                tracing::warn!(article_id = %id, error = %err, "Cache lookup failed");
                Ok(None)
            }
        }
    }

    /// Writes an article to the cache under the repository TTL.
    async fn populate(&self, ctx: &CancellationToken, article: &ArticleWithAuthor) {
        let cache_key = self.cache_key(article.id);
        let result = match serialize_article(article) {
            Ok(bytes) => cache_call(ctx, self.cache.set(&cache_key, &bytes, self.ttl)).await,
            Err(err) => Err(CacheError::from(err)),
        };

        if let Err(err) = result {
            tracing::warn!(article_id = %article.id, error = %err, "Failed to cache article");
        }
    }
}

#[async_trait]
impl<S, C> ArticleRepository for CachedArticleRepository<S, C>
where
    S: ArticleStore + 'static,
    C: Cache + 'static,
{
    async fn create(&self, ctx: &CancellationToken, article: NewArticle) -> Result<Article> {
        let created = cancellable(ctx, self.store.insert_article(&article)).await??;

        tracing::debug!(article_id = %created.id, author_id = %created.author_id, "Article created");
        Ok(created)
    }

    async fn update(&self, ctx: &CancellationToken, update: ArticleUpdate) -> Result<Article> {
        let updated = cancellable(ctx, self.store.update_article(&update))
            .await??
            .ok_or_else(|| RepositoryError::article_not_found(update.id))?;

        self.invalidate(ctx, updated.id).await;

        tracing::debug!(article_id = %updated.id, "Article updated");
        Ok(updated)
    }

    async fn get_by_id(&self, ctx: &CancellationToken, id: Uuid) -> Result<ArticleWithAuthor> {
        if let Some(article) = self.cached(ctx, id).await? {
            return Ok(article);
        }

        let article = cancellable(ctx, self.store.get_article_with_author(id))
            .await??
            .ok_or_else(|| RepositoryError::article_not_found(id))?;

        self.populate(ctx, &article).await;
        Ok(article)
    }

    async fn delete(&self, ctx: &CancellationToken, id: Uuid) -> Result<()> {
        let rows = cancellable(ctx, self.store.delete_article(id)).await??;
        if rows == 0 {
            return Err(RepositoryError::article_not_found(id));
        }

        self.invalidate(ctx, id).await;

        tracing::debug!(article_id = %id, "Article deleted");
        Ok(())
    }

    async fn list(&self, ctx: &CancellationToken, pagination: Pagination) -> Result<ArticleList> {
        let total_count = cancellable(ctx, self.store.count_articles()).await??;
        let articles = cancellable(
            ctx,
            self.store
                .list_articles(pagination.offset(), pagination.limit()),
        )
        .await??;

        tracing::trace!(
            page = pagination.page(),
            size = pagination.size(),
            total_count,
            "Listed articles"
        );
        Ok(ArticleList::new(pagination, total_count, articles))
    }

    async fn search_by_title(
        &self,
        ctx: &CancellationToken,
        title: &str,
        pagination: Pagination,
    ) -> Result<ArticleList> {
        let total_count = cancellable(ctx, self.store.count_articles_by_title(title)).await??;
        let articles = cancellable(
            ctx,
            self.store
                .search_articles_by_title(title, pagination.offset(), pagination.limit()),
        )
        .await??;

        tracing::trace!(
            title,
            page = pagination.page(),
            size = pagination.size(),
            total_count,
            "Searched articles by title"
        );
        Ok(ArticleList::new(pagination, total_count, articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use newsdesk_core::article::Author;
    use tokio::sync::RwLock;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use crate::storage::inmemory::InMemoryStore;

    const TTL: Duration = Duration::from_secs(50);

    // ==================== Test doubles ====================

    /// In-memory store that counts calls per capability.
    ///
    /// Count queries can be made to hang to simulate a slow store.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryStore,
        gets: AtomicUsize,
        counts: AtomicUsize,
        scans: AtomicUsize,
        hang_count: AtomicBool,
    }

    impl CountingStore {
        async fn with_author() -> (Self, Author) {
            let store = Self::default();
            let author = Author::new("Ada", "Lovelace");
            store.inner.insert_author(&author).await.unwrap();
            (store, author)
        }

        fn gets(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }

        async fn counted(&self) {
            self.counts.fetch_add(1, Ordering::SeqCst);
            if self.hang_count.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
        }
    }

    #[async_trait]
    impl ArticleStore for CountingStore {
        async fn insert_article(&self, article: &NewArticle) -> Result<Article> {
            self.inner.insert_article(article).await
        }

        async fn update_article(&self, update: &ArticleUpdate) -> Result<Option<Article>> {
            self.inner.update_article(update).await
        }

        async fn delete_article(&self, id: Uuid) -> Result<u64> {
            self.inner.delete_article(id).await
        }

        async fn get_article_with_author(&self, id: Uuid) -> Result<Option<ArticleWithAuthor>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get_article_with_author(id).await
        }

        async fn count_articles(&self) -> Result<u64> {
            self.counted().await;
            self.inner.count_articles().await
        }

        async fn list_articles(&self, offset: u64, limit: u64) -> Result<Vec<Article>> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.inner.list_articles(offset, limit).await
        }

        async fn count_articles_by_title(&self, title: &str) -> Result<u64> {
            self.counted().await;
            self.inner.count_articles_by_title(title).await
        }

        async fn search_articles_by_title(
            &self,
            title: &str,
            offset: u64,
            limit: u64,
        ) -> Result<Vec<Article>> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.inner
                .search_articles_by_title(title, offset, limit)
                .await
        }
    }

    /// HashMap cache whose operations can be switched to fail or hang.
    #[derive(Default)]
    struct MockCache {
        data: RwLock<HashMap<String, Vec<u8>>>,
        ttls: RwLock<HashMap<String, Duration>>,
        fail_get: AtomicBool,
        fail_set: AtomicBool,
        fail_delete: AtomicBool,
        hang_get: AtomicBool,
        hang_set: AtomicBool,
        hang_delete: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockCache {
        fn outage() -> CacheError {
            CacheError::ConnectionFailed("connection refused".to_string())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn raw(&self, key: &str) -> Option<Vec<u8>> {
            self.data.read().await.get(key).cloned()
        }

        async fn put_raw(&self, key: &str, value: &[u8]) {
            self.data
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_get.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(Self::outage());
            }
            Ok(self.raw(key).await)
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_set.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(Self::outage());
            }
            self.put_raw(key, value).await;
            self.ttls.write().await.insert(key.to_string(), ttl);
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_delete.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(Self::outage());
            }
            self.data.write().await.remove(key);
            Ok(())
        }
    }

    /// Tracing layer that counts `WARN` events.
    #[derive(Clone, Default)]
    struct WarnCounter {
        count: Arc<AtomicUsize>,
    }

    impl WarnCounter {
        fn count(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.count.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    type TestRepository = CachedArticleRepository<CountingStore, MockCache>;

    async fn setup() -> (TestRepository, Arc<CountingStore>, Arc<MockCache>, Author) {
        let (store, author) = CountingStore::with_author().await;
        let store = Arc::new(store);
        let cache = Arc::new(MockCache::default());
        let repo = CachedArticleRepository::new(store.clone(), cache.clone(), TTL);
        (repo, store, cache, author)
    }

    async fn create(repo: &TestRepository, author: &Author, title: &str) -> Article {
        repo.create(
            &CancellationToken::new(),
            NewArticle::new(author.id, title, "body", "misc"),
        )
        .await
        .unwrap()
    }

    fn page(page: u32, size: u32) -> Pagination {
        Pagination::new(page, size).unwrap()
    }

    /// Returns a token that fires after a short delay.
    fn cancel_soon() -> CancellationToken {
        let ctx = CancellationToken::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });
        ctx
    }

    // ==================== Create ====================

    #[tokio::test]
    async fn test_create_does_not_touch_cache() {
        let (repo, _store, cache, author) = setup().await;

        let created = create(&repo, &author, "Launch").await;

        assert_eq!(created.title, "Launch");
        assert_eq!(cache.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_store_error_is_returned() {
        let (repo, _store, _cache, _author) = setup().await;

        let result = repo
            .create(
                &CancellationToken::new(),
                NewArticle::new(Uuid::new_v4(), "Orphan", "body", "misc"),
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    // ==================== GetByID ====================

    #[tokio::test]
    async fn test_get_by_id_miss_populates_cache() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        let ctx = CancellationToken::new();

        let first = repo.get_by_id(&ctx, created.id).await.unwrap();
        assert_eq!(first.author, "Ada Lovelace");
        assert_eq!(store.gets(), 1);

        let key = article_key(DEFAULT_ARTICLE_KEY_PREFIX, created.id);
        assert!(cache.raw(&key).await.is_some());
        assert_eq!(cache.ttls.read().await.get(&key), Some(&TTL));

        let second = repo.get_by_id(&ctx, created.id).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(store.gets(), 1, "cache hit must not consult the store");
    }

    #[tokio::test]
    async fn test_get_by_id_uses_key_prefix() {
        let (store, author) = CountingStore::with_author().await;
        let cache = Arc::new(MockCache::default());
        let repo = CachedArticleRepository::new(Arc::new(store), cache.clone(), TTL)
            .with_key_prefix("news:");
        let created = create(&repo, &author, "Launch").await;

        repo.get_by_id(&CancellationToken::new(), created.id)
            .await
            .unwrap();

        assert!(cache.raw(&format!("news:{}", created.id)).await.is_some());
        assert!(cache
            .raw(&article_key(DEFAULT_ARTICLE_KEY_PREFIX, created.id))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let (repo, _store, cache, _author) = setup().await;
        let id = Uuid::new_v4();

        let result = repo.get_by_id(&CancellationToken::new(), id).await;

        assert_eq!(result, Err(RepositoryError::article_not_found(id)));
        assert!(cache.data.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_corrupt_entry_falls_back_to_store() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        let key = article_key(DEFAULT_ARTICLE_KEY_PREFIX, created.id);
        cache.put_raw(&key, b"{not json").await;

        let warnings = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let fetched = repo
            .get_by_id(&CancellationToken::new(), created.id)
            .await
            .unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(store.gets(), 1);
        assert_eq!(warnings.count(), 1);
        // The store result replaces the corrupt entry.
        let repaired = cache.raw(&key).await.unwrap();
        assert_eq!(deserialize_article(&repaired).unwrap(), fetched);
    }

    #[tokio::test]
    async fn test_get_by_id_survives_cache_outage() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        cache.fail_get.store(true, Ordering::SeqCst);
        cache.fail_set.store(true, Ordering::SeqCst);

        let warnings = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let ctx = CancellationToken::new();
        let first = repo.get_by_id(&ctx, created.id).await.unwrap();
        let second = repo.get_by_id(&ctx, created.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.gets(), 2);
        // One failed lookup and one failed populate per call.
        assert_eq!(warnings.count(), 4);
    }

    // ==================== Update ====================

    #[tokio::test]
    async fn test_update_invalidates_cached_article() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Draft").await;
        let ctx = CancellationToken::new();
        repo.get_by_id(&ctx, created.id).await.unwrap();

        let updated = repo
            .update(&ctx, ArticleUpdate::new(created.id, "Final", "done", "news"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Final");
        assert!(cache
            .raw(&article_key(DEFAULT_ARTICLE_KEY_PREFIX, created.id))
            .await
            .is_none());

        let fetched = repo.get_by_id(&ctx, created.id).await.unwrap();
        assert_eq!(fetched.title, "Final");
        assert_eq!(store.gets(), 2);
    }

    #[tokio::test]
    async fn test_update_with_failed_invalidation_may_serve_stale() {
        let (repo, _store, cache, author) = setup().await;
        let created = create(&repo, &author, "Draft").await;
        let ctx = CancellationToken::new();
        repo.get_by_id(&ctx, created.id).await.unwrap();
        cache.fail_delete.store(true, Ordering::SeqCst);

        let updated = repo
            .update(&ctx, ArticleUpdate::new(created.id, "Final", "done", "news"))
            .await;
        assert!(updated.is_ok(), "invalidation failure must not fail the update");

        // Stale until the entry expires.
        let fetched = repo.get_by_id(&ctx, created.id).await.unwrap();
        assert_eq!(fetched.title, "Draft");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (repo, _store, cache, _author) = setup().await;
        let id = Uuid::new_v4();

        let result = repo
            .update(
                &CancellationToken::new(),
                ArticleUpdate::new(id, "t", "c", "k"),
            )
            .await;

        assert_eq!(result, Err(RepositoryError::article_not_found(id)));
        assert_eq!(cache.calls(), 0);
    }

    // ==================== Delete ====================

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (repo, _store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        let ctx = CancellationToken::new();
        repo.get_by_id(&ctx, created.id).await.unwrap();

        repo.delete(&ctx, created.id).await.unwrap();

        assert!(cache
            .raw(&article_key(DEFAULT_ARTICLE_KEY_PREFIX, created.id))
            .await
            .is_none());
        assert!(repo
            .get_by_id(&ctx, created.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (repo, _store, cache, _author) = setup().await;
        let id = Uuid::new_v4();

        let result = repo.delete(&CancellationToken::new(), id).await;

        assert_eq!(result, Err(RepositoryError::article_not_found(id)));
        assert_eq!(cache.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_invalidation_fails() {
        let (repo, _store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        cache.fail_delete.store(true, Ordering::SeqCst);

        let result = repo.delete(&CancellationToken::new(), created.id).await;

        assert!(result.is_ok());
    }

    // ==================== List / Search ====================

    #[tokio::test]
    async fn test_list_single_article() {
        let (repo, _store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;

        let list = repo
            .list(&CancellationToken::new(), page(1, 10))
            .await
            .unwrap();

        assert_eq!(list.total_count, 1);
        assert_eq!(list.total_pages, 1);
        assert!(!list.has_more);
        assert_eq!(list.articles, vec![created]);
        assert_eq!(cache.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_second_page_of_25() {
        let (repo, store, cache, author) = setup().await;
        for i in 0..25 {
            create(&repo, &author, &format!("Article {i}")).await;
        }

        let list = repo
            .list(&CancellationToken::new(), page(2, 10))
            .await
            .unwrap();

        assert_eq!(list.articles.len(), 10);
        assert_eq!(list.total_count, 25);
        assert_eq!(list.total_pages, 3);
        assert_eq!(list.page, 2);
        assert!(list.has_more);
        assert_eq!(store.counts.load(Ordering::SeqCst), 1);
        assert_eq!(store.scans.load(Ordering::SeqCst), 1);
        assert_eq!(cache.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_past_the_end_is_empty() {
        let (repo, _store, _cache, author) = setup().await;
        create(&repo, &author, "Launch").await;

        let list = repo
            .list(&CancellationToken::new(), page(5, 10))
            .await
            .unwrap();

        assert!(list.articles.is_empty());
        assert_eq!(list.total_count, 1);
        assert!(!list.has_more);
    }

    #[tokio::test]
    async fn test_search_by_title_filters_and_pages() {
        let (repo, _store, cache, author) = setup().await;
        for title in ["Rocket Launch", "launch party", "Weather", "Prelaunch checks"] {
            create(&repo, &author, title).await;
        }

        let list = repo
            .search_by_title(&CancellationToken::new(), "launch", page(1, 2))
            .await
            .unwrap();

        assert_eq!(list.total_count, 3);
        assert_eq!(list.total_pages, 2);
        assert!(list.has_more);
        assert_eq!(list.articles.len(), 2);
        assert_eq!(cache.calls(), 0);
    }

    // ==================== Cancellation ====================

    #[tokio::test]
    async fn test_cancelled_token_fails_before_store() {
        let (repo, store, _cache, author) = setup().await;
        let ctx = CancellationToken::new();
        ctx.cancel();

        let created = repo
            .create(&ctx, NewArticle::new(author.id, "Launch", "body", "misc"))
            .await;
        let listed = repo.list(&ctx, page(1, 10)).await;

        assert_eq!(created, Err(RepositoryError::Cancelled));
        assert_eq!(listed, Err(RepositoryError::Cancelled));
        assert_eq!(store.inner.count_articles().await.unwrap(), 0);
        assert_eq!(store.counts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_cache_lookup() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        cache.hang_get.store(true, Ordering::SeqCst);

        let result = repo.get_by_id(&cancel_soon(), created.id).await;

        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(store.gets(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_list_count() {
        let (repo, store, _cache, author) = setup().await;
        create(&repo, &author, "Launch").await;
        store.hang_count.store(true, Ordering::SeqCst);

        let result = repo.list(&cancel_soon(), page(1, 10)).await;

        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(store.counts.load(Ordering::SeqCst), 1);
        assert_eq!(store.scans.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_search_count() {
        let (repo, store, _cache, author) = setup().await;
        create(&repo, &author, "Launch").await;
        store.hang_count.store(true, Ordering::SeqCst);

        let result = repo
            .search_by_title(&cancel_soon(), "launch", page(1, 10))
            .await;

        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(store.scans.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_cancelled_during_invalidation_returns_committed_row() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Draft").await;
        cache.hang_delete.store(true, Ordering::SeqCst);

        let warnings = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let updated = repo
            .update(
                &cancel_soon(),
                ArticleUpdate::new(created.id, "Final", "done", "news"),
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(warnings.count(), 1);
        let stored = store
            .inner
            .get_article_with_author(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, "Final");
    }

    #[tokio::test]
    async fn test_delete_cancelled_during_invalidation_still_succeeds() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        cache.hang_delete.store(true, Ordering::SeqCst);

        let warnings = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let result = repo.delete(&cancel_soon(), created.id).await;

        assert_eq!(result, Ok(()));
        assert_eq!(warnings.count(), 1);
        assert!(store
            .inner
            .get_article_with_author(created.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_cancelled_during_populate_returns_article() {
        let (repo, store, cache, author) = setup().await;
        let created = create(&repo, &author, "Launch").await;
        cache.hang_set.store(true, Ordering::SeqCst);

        let warnings = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(warnings.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let fetched = repo.get_by_id(&cancel_soon(), created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.author, "Ada Lovelace");
        assert_eq!(store.gets(), 1);
        assert_eq!(warnings.count(), 1);
    }
}
