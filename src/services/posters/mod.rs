/// Poster enrichment
///
/// A [`PosterProvider`] looks up the poster for one title. [`PosterService`]
/// wraps a provider with optional caching and placeholder substitution, so
/// enrichment never fails a response: a missing poster or a failed lookup both
/// come back as the placeholder image.
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::{
    cache::{Cache, CacheKey},
    cached,
    error::AppResult,
    models::Poster,
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Source of poster images
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Poster URL for `title`, `None` when the source has no poster for it
    async fn fetch_poster(&self, title: &str) -> AppResult<Option<String>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Whether lookup outcomes may be stored in the poster cache
    fn caches_results(&self) -> bool {
        true
    }
}

/// Provider used when no poster API is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderProvider;

#[async_trait::async_trait]
impl PosterProvider for PlaceholderProvider {
    async fn fetch_poster(&self, _title: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }

    // A "no poster" answer here says nothing about the title
    fn caches_results(&self) -> bool {
        false
    }
}

#[derive(Clone)]
pub struct PosterService {
    provider: Arc<dyn PosterProvider>,
    cache: Option<Cache>,
    cache_ttl: u64,
    placeholder_url: String,
    concurrency: usize,
}

impl PosterService {
    pub fn new(provider: Arc<dyn PosterProvider>, placeholder_url: impl Into<String>) -> Self {
        Self {
            provider,
            cache: None,
            cache_ttl: 0,
            placeholder_url: placeholder_url.into(),
            concurrency: 8,
        }
    }

    /// Cache lookup outcomes for `ttl` seconds.
    ///
    /// Ignored when the provider's results must not be cached.
    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        if !self.provider.caches_results() {
            tracing::info!(
                provider = self.provider.name(),
                "Poster provider results are not cacheable, cache disabled"
            );
            return self;
        }
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Maximum lookups in flight during a batch (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    async fn lookup(&self, title: &str) -> AppResult<Option<String>> {
        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::Poster(title.to_string()),
                self.cache_ttl,
                self.provider.fetch_poster(title)
            ),
            None => self.provider.fetch_poster(title).await,
        }
    }

    /// Poster for one title, falling back to the placeholder
    pub async fn poster_for(&self, title: &str) -> Poster {
        let poster_url = match self.lookup(title).await {
            Ok(Some(url)) => url,
            Ok(None) => self.placeholder_url.clone(),
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster lookup failed, using placeholder"
                );
                self.placeholder_url.clone()
            }
        };

        Poster {
            title: title.to_string(),
            poster_url,
        }
    }

    /// Posters for every title, looked up concurrently.
    ///
    /// The output has one entry per input title, in input order.
    pub async fn posters_for(&self, titles: Vec<String>) -> Vec<Poster> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = Vec::with_capacity(titles.len());

        for title in &titles {
            let service = self.clone();
            let permits = permits.clone();
            let title = title.clone();
            tasks.push(tokio::spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                service.poster_for(&title).await
            }));
        }

        let mut posters = Vec::with_capacity(tasks.len());
        for (task, title) in tasks.into_iter().zip(titles) {
            match task.await {
                Ok(poster) => posters.push(poster),
                Err(e) => {
                    tracing::error!(error = %e, title = %title, "Poster task join error");
                    posters.push(Poster {
                        title,
                        poster_url: self.placeholder_url.clone(),
                    });
                }
            }
        }

        posters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use mockall::predicate::eq;

    const PLACEHOLDER: &str = "https://via.placeholder.com/150";

    fn service(mock: MockPosterProvider) -> PosterService {
        PosterService::new(Arc::new(mock), PLACEHOLDER)
    }

    #[tokio::test]
    async fn test_poster_found() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster()
            .with(eq("Avatar"))
            .times(1)
            .returning(|_| Ok(Some("https://img/avatar.jpg".to_string())));
        mock.expect_name().return_const("mock");

        let poster = service(mock).poster_for("Avatar").await;
        assert_eq!(poster.title, "Avatar");
        assert_eq!(poster.poster_url, "https://img/avatar.jpg");
    }

    #[tokio::test]
    async fn test_missing_poster_uses_placeholder() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster().returning(|_| Ok(None));
        mock.expect_name().return_const("mock");

        let poster = service(mock).poster_for("Obscure").await;
        assert_eq!(poster.poster_url, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_lookup_error_uses_placeholder() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));
        mock.expect_name().return_const("mock");

        let poster = service(mock).poster_for("Avatar").await;
        assert_eq!(poster.poster_url, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_degrades_per_title() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster().returning(|title| match title {
            "A" => Ok(Some("https://img/a.jpg".to_string())),
            "B" => Err(AppError::ExternalApi("boom".to_string())),
            _ => Ok(None),
        });
        mock.expect_name().return_const("mock");

        let posters = service(mock)
            .with_concurrency(2)
            .posters_for(vec!["A".into(), "B".into(), "C".into()])
            .await;

        let urls: Vec<&str> = posters.iter().map(|p| p.poster_url.as_str()).collect();
        let titles: Vec<&str> = posters.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(urls, vec!["https://img/a.jpg", PLACEHOLDER, PLACEHOLDER]);
    }

    fn unreachable_cache() -> Cache {
        let client = crate::cache::create_redis_client("redis://127.0.0.1:1").unwrap();
        Cache::new(client).0
    }

    #[tokio::test]
    async fn test_uncacheable_provider_skips_cache() {
        let mut mock = MockPosterProvider::new();
        mock.expect_caches_results().return_const(false);
        mock.expect_name().return_const("mock");
        // Both calls reach the provider: nothing is read from or written to the cache
        mock.expect_fetch_poster()
            .with(eq("Avatar"))
            .times(2)
            .returning(|_| Ok(None));

        let service = service(mock).with_cache(unreachable_cache(), 60);
        assert!(!service.is_cached());

        assert_eq!(service.poster_for("Avatar").await.poster_url, PLACEHOLDER);
        assert_eq!(service.poster_for("Avatar").await.poster_url, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_placeholder_provider_is_never_cached() {
        assert!(!PlaceholderProvider.caches_results());
        let service = PosterService::new(Arc::new(PlaceholderProvider), PLACEHOLDER)
            .with_cache(unreachable_cache(), 60);
        assert!(!service.is_cached());
    }

    #[tokio::test]
    async fn test_cacheable_provider_keeps_cache() {
        let mut mock = MockPosterProvider::new();
        mock.expect_caches_results().return_const(true);
        mock.expect_name().return_const("mock");

        let service = service(mock).with_cache(unreachable_cache(), 60);
        assert!(service.is_cached());
    }

    #[tokio::test]
    async fn test_placeholder_provider_never_fails() {
        let result = PlaceholderProvider.fetch_poster("Avatar").await;
        tokio_test::assert_ok!(&result);
        assert_eq!(result.unwrap(), None);

        let poster = PosterService::new(Arc::new(PlaceholderProvider), PLACEHOLDER)
            .poster_for("Avatar")
            .await;
        assert_eq!(poster.poster_url, PLACEHOLDER);
    }
}
