use crate::accountant::HitAccountant;
use crate::error::ResolveError;
use minilink_core::cache::CACHE_TTL;
use minilink_core::{MappingStore, ShortCode, UrlCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

/// Deadline applied to every individual store/cache call.
const CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Health signals reported to the serving layer.
///
/// Overall service health is gated on `cache_ready` alone; the store
/// signal is reported as a second, explicit field so operators see
/// durable-store reachability without it flipping the health gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSummary {
    pub cache_ready: bool,
    pub store_ready: bool,
}

/// Service that resolves short codes to original URLs.
///
/// Lookup is cache-aside: the cache is consulted first and any cache
/// error degrades to a store read, never to a user-visible failure.
/// The two side effects of a successful resolution — cache
/// repopulation and hit accounting — run as detached tasks the
/// request path does not await.
#[derive(Debug, Clone)]
pub struct ResolutionService<S, C> {
    store: Arc<S>,
    cache: Arc<C>,
    accountant: HitAccountant<S>,
}

impl<S, C> ResolutionService<S, C>
where
    S: MappingStore,
    C: UrlCache,
{
    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        let accountant = HitAccountant::new(Arc::clone(&store));
        Self {
            store,
            cache,
            accountant,
        }
    }

    /// Resolves a short code to its original URL.
    ///
    /// A code that does not match the generator's format is reported as
    /// `NotFound`: to a client the two cases are indistinguishable.
    pub async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        let Ok(code) = ShortCode::parse(code) else {
            trace!(code, "malformed short code");
            return Err(ResolveError::NotFound);
        };

        if let Some(url) = self.cache_lookup(&code).await {
            self.accountant.record(&code);
            return Ok(url);
        }

        let mapping = timeout(CALL_TIMEOUT, self.store.get(&code))
            .await
            .map_err(|_| ResolveError::StoreUnavailable("store lookup timed out".to_string()))?
            .map_err(|e| ResolveError::StoreUnavailable(e.to_string()))?;

        let Some(mapping) = mapping else {
            trace!(code = %code, "short code not found");
            return Err(ResolveError::NotFound);
        };

        debug!(code = %code, url = %mapping.original_url, "resolved from store");
        self.repopulate_cache(&code, &mapping.original_url);
        self.accountant.record(&code);
        Ok(mapping.original_url)
    }

    /// Reports cache and store reachability, each probed under its own
    /// deadline.
    pub async fn health_summary(&self) -> HealthSummary {
        let cache_ready = matches!(timeout(CALL_TIMEOUT, self.cache.ping()).await, Ok(Ok(())));
        let store_ready = matches!(timeout(CALL_TIMEOUT, self.store.ping()).await, Ok(Ok(())));
        HealthSummary {
            cache_ready,
            store_ready,
        }
    }

    /// Cache read that fails open: errors and timeouts count as a miss.
    async fn cache_lookup(&self, code: &ShortCode) -> Option<String> {
        match timeout(CALL_TIMEOUT, self.cache.get_url(code)).await {
            Ok(Ok(Some(url))) => {
                debug!(code = %code, "resolved from cache");
                Some(url)
            }
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                warn!(code = %code, error = %e, "cache error, falling back to store");
                None
            }
            Err(_) => {
                warn!(code = %code, "cache lookup timed out, falling back to store");
                None
            }
        }
    }

    /// Detached cache repopulation after a store hit.
    fn repopulate_cache(&self, code: &ShortCode, url: &str) {
        let cache = Arc::clone(&self.cache);
        let code = code.clone();
        let url = url.to_owned();

        tokio::spawn(async move {
            match timeout(CALL_TIMEOUT, cache.set_url(&code, &url, CACHE_TTL)).await {
                Ok(Ok(())) => trace!(code = %code, "repopulated cache"),
                Ok(Err(e)) => warn!(code = %code, error = %e, "failed to repopulate cache"),
                Err(_) => warn!(code = %code, "cache repopulation timed out"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use minilink_cache::MokaUrlCache;
    use minilink_core::cache::Result as CacheResult;
    use minilink_core::store::Result as StoreResult;
    use minilink_core::{CacheError, StoreError, UrlMapping};
    use minilink_store::InMemoryMappingStore;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store wrapper that counts read traffic reaching the durable layer.
    struct CountingStore {
        inner: InMemoryMappingStore,
        gets: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: InMemoryMappingStore::new(),
                gets: AtomicUsize::new(0),
            }
        }

        fn get_count(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MappingStore for CountingStore {
        async fn put_if_absent(&self, mapping: &UrlMapping) -> StoreResult<()> {
            self.inner.put_if_absent(mapping).await
        }

        async fn get(&self, code: &ShortCode) -> StoreResult<Option<UrlMapping>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(code).await
        }

        async fn increment_hits(&self, code: &ShortCode) -> StoreResult<()> {
            self.inner.increment_hits(code).await
        }

        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    /// Store whose every operation fails.
    struct FailingStore;

    #[async_trait]
    impl MappingStore for FailingStore {
        async fn put_if_absent(&self, _mapping: &UrlMapping) -> StoreResult<()> {
            Err(StoreError::Unavailable("down".to_string()))
        }

        async fn get(&self, _code: &ShortCode) -> StoreResult<Option<UrlMapping>> {
            Err(StoreError::Unavailable("down".to_string()))
        }

        async fn increment_hits(&self, _code: &ShortCode) -> StoreResult<()> {
            Err(StoreError::Unavailable("down".to_string()))
        }

        async fn ping(&self) -> StoreResult<()> {
            Err(StoreError::Unavailable("down".to_string()))
        }
    }

    /// Store that never completes a call.
    struct HangingStore;

    #[async_trait]
    impl MappingStore for HangingStore {
        async fn put_if_absent(&self, _mapping: &UrlMapping) -> StoreResult<()> {
            std::future::pending().await
        }

        async fn get(&self, _code: &ShortCode) -> StoreResult<Option<UrlMapping>> {
            std::future::pending().await
        }

        async fn increment_hits(&self, _code: &ShortCode) -> StoreResult<()> {
            std::future::pending().await
        }

        async fn ping(&self) -> StoreResult<()> {
            std::future::pending().await
        }
    }

    /// Cache that never completes a call.
    struct HangingCache;

    #[async_trait]
    impl UrlCache for HangingCache {
        async fn get_url(&self, _code: &ShortCode) -> CacheResult<Option<String>> {
            std::future::pending().await
        }

        async fn set_url(&self, _code: &ShortCode, _url: &str, _ttl: Duration) -> CacheResult<()> {
            std::future::pending().await
        }

        async fn ping(&self) -> CacheResult<()> {
            std::future::pending().await
        }
    }

    /// Cache whose every operation fails.
    struct FailingCache;

    #[async_trait]
    impl UrlCache for FailingCache {
        async fn get_url(&self, _code: &ShortCode) -> CacheResult<Option<String>> {
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn set_url(&self, _code: &ShortCode, _url: &str, _ttl: Duration) -> CacheResult<()> {
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn ping(&self) -> CacheResult<()> {
            Err(CacheError::Unavailable("down".to_string()))
        }
    }

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    fn mapping(c: &str, url: &str) -> UrlMapping {
        UrlMapping::new(code(c), url, "short.ly")
    }

    /// Polls an async condition until it holds or a deadline passes.
    async fn eventually<F, Fut>(what: &str, mut condition: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        for _ in 0..200 {
            if condition().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not met within deadline: {what}");
    }

    #[tokio::test]
    async fn resolve_from_store_on_cache_miss() {
        let store = Arc::new(CountingStore::new());
        store
            .put_if_absent(&mapping("abcDEF123", "https://example.com/page"))
            .await
            .unwrap();
        let svc = ResolutionService::new(Arc::clone(&store), Arc::new(MokaUrlCache::new()));

        let url = svc.resolve("abcDEF123").await.unwrap();
        assert_eq!(url, "https://example.com/page");
        assert_eq!(store.get_count(), 1);
    }

    #[tokio::test]
    async fn resolve_unknown_code_is_not_found() {
        let svc = ResolutionService::new(
            Arc::new(InMemoryMappingStore::new()),
            Arc::new(MokaUrlCache::new()),
        );

        let err = svc.resolve("doesnotex").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
    }

    #[tokio::test]
    async fn malformed_code_is_not_found() {
        let store = Arc::new(CountingStore::new());
        let svc = ResolutionService::new(Arc::clone(&store), Arc::new(MokaUrlCache::new()));

        let err = svc.resolve("doesnotexist").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
        // malformed codes never reach the store
        assert_eq!(store.get_count(), 0);
    }

    #[tokio::test]
    async fn cache_hit_skips_the_store() {
        let store = Arc::new(CountingStore::new());
        let cache = Arc::new(MokaUrlCache::new());
        cache
            .set_url(&code("abcDEF123"), "https://example.com", CACHE_TTL)
            .await
            .unwrap();
        let svc = ResolutionService::new(Arc::clone(&store), cache);

        let url = svc.resolve("abcDEF123").await.unwrap();
        assert_eq!(url, "https://example.com");
        assert_eq!(store.get_count(), 0);
    }

    #[tokio::test]
    async fn miss_repopulates_cache_so_next_resolve_skips_store() {
        let store = Arc::new(CountingStore::new());
        store
            .put_if_absent(&mapping("abcDEF123", "https://example.com"))
            .await
            .unwrap();
        let cache = Arc::new(MokaUrlCache::new());
        let svc = ResolutionService::new(Arc::clone(&store), Arc::clone(&cache));

        svc.resolve("abcDEF123").await.unwrap();
        assert_eq!(store.get_count(), 1);

        // repopulation is detached, so wait for it to land
        eventually("cache repopulated", || {
            let cache = Arc::clone(&cache);
            async move { cache.get_url(&code("abcDEF123")).await.unwrap().is_some() }
        })
        .await;

        let url = svc.resolve("abcDEF123").await.unwrap();
        assert_eq!(url, "https://example.com");
        assert_eq!(store.get_count(), 1);
    }

    #[tokio::test]
    async fn hit_count_converges_after_k_resolutions() {
        let store = Arc::new(InMemoryMappingStore::new());
        store
            .put_if_absent(&mapping("abcDEF123", "https://example.com"))
            .await
            .unwrap();
        let svc = ResolutionService::new(Arc::clone(&store), Arc::new(MokaUrlCache::new()));

        for _ in 0..5 {
            svc.resolve("abcDEF123").await.unwrap();
        }

        eventually("hit count reaches 5", || {
            let store = Arc::clone(&store);
            async move {
                store
                    .get(&code("abcDEF123"))
                    .await
                    .unwrap()
                    .unwrap()
                    .hit_count
                    == 5
            }
        })
        .await;
    }

    #[tokio::test]
    async fn cache_failure_fails_open_to_store() {
        let store = Arc::new(InMemoryMappingStore::new());
        store
            .put_if_absent(&mapping("abcDEF123", "https://example.com"))
            .await
            .unwrap();
        let svc = ResolutionService::new(Arc::clone(&store), Arc::new(FailingCache));

        let url = svc.resolve("abcDEF123").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn store_failure_surfaces() {
        let svc = ResolutionService::new(Arc::new(FailingStore), Arc::new(MokaUrlCache::new()));

        let err = svc.resolve("abcDEF123").await.unwrap_err();
        assert!(matches!(err, ResolveError::StoreUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_store_times_out_as_unavailable() {
        let svc = ResolutionService::new(Arc::new(HangingStore), Arc::new(MokaUrlCache::new()));

        let err = svc.resolve("abcDEF123").await.unwrap_err();
        assert!(matches!(err, ResolveError::StoreUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_cache_falls_open_to_store() {
        let store = Arc::new(InMemoryMappingStore::new());
        store
            .put_if_absent(&mapping("abcDEF123", "https://example.com"))
            .await
            .unwrap();
        let svc = ResolutionService::new(Arc::clone(&store), Arc::new(HangingCache));

        let url = svc.resolve("abcDEF123").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_probes_report_unready() {
        let svc = ResolutionService::new(Arc::new(HangingStore), Arc::new(HangingCache));

        let health = svc.health_summary().await;
        assert!(!health.cache_ready);
        assert!(!health.store_ready);
    }

    #[tokio::test]
    async fn health_reports_both_signals() {
        let svc = ResolutionService::new(
            Arc::new(InMemoryMappingStore::new()),
            Arc::new(MokaUrlCache::new()),
        );
        let health = svc.health_summary().await;
        assert!(health.cache_ready);
        assert!(health.store_ready);

        let degraded = ResolutionService::new(
            Arc::new(InMemoryMappingStore::new()),
            Arc::new(FailingCache),
        );
        let health = degraded.health_summary().await;
        assert!(!health.cache_ready);
        assert!(health.store_ready);

        let no_store =
            ResolutionService::new(Arc::new(FailingStore), Arc::new(MokaUrlCache::new()));
        let health = no_store.health_summary().await;
        assert!(health.cache_ready);
        assert!(!health.store_ready);
    }
}
