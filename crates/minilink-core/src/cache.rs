use crate::error::CacheError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::time::Duration;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// How long a cached `short code → URL` entry stays live (24 hours).
pub const CACHE_TTL: Duration = Duration::from_secs(86_400);

/// Ephemeral `short code → original URL` cache with per-key expiration.
///
/// The cache holds a time-bounded projection of the durable store and
/// is purely a latency optimization: its absence or staleness within
/// the TTL window must never affect correctness. Callers are expected
/// to absorb every cache error and fall back to the store.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// Get the cached original URL for a short code.
    ///
    /// Returns `Ok(None)` if the key is not in the cache.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Store the original URL under the short code with the given TTL.
    async fn set_url(&self, code: &ShortCode, url: &str, ttl: Duration) -> Result<()>;

    /// Probes backend reachability.
    async fn ping(&self) -> Result<()>;
}
