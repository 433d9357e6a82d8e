/// A macro to simplify caching logic using Redis.
///
/// Checks the cache for `$key` and returns the cached value when present.
/// Otherwise awaits `$block`, stores its value in the background and returns it.
/// A failed cache read is logged and treated as a miss; errors from `$block`
/// propagate and are never cached.
///
/// # Arguments
/// * `$cache`: The cache instance to use for retrieval and storage. The cache must have
///   `get_from_cache` and `set_in_background` methods.
/// * `$key`: The key to use for caching the value.
/// * `$ttl`: The time-to-live (TTL) for the cached value in seconds.
/// * `$block`: The future computing the value on a miss.
///
/// # Example
/// ```rust,ignore
/// let poster: Option<String> = cached!(cache, CacheKey::Poster(title.clone()), ttl, async {
///     provider.fetch_poster(&title).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let cached = match $cache.get_from_cache(&$key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(key = %$key, error = %e, "Cache read failed, treating as miss");
                None
            }
        };

        match cached {
            Some(value) => Ok(value),
            None => match $block.await {
                Ok(value) => {
                    $cache.set_in_background(&$key, &value, $ttl);
                    Ok(value)
                }
                Err(e) => Err(e),
            },
        }
    }};
}
