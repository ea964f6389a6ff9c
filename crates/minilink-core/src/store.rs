use crate::error::StoreError;
use crate::mapping::UrlMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable key-value persistence for URL mappings, keyed by short code.
///
/// The store is the single source of truth. Implementations must make
/// `put_if_absent` genuinely conditional: a losing concurrent writer
/// receives [`StoreError::AlreadyExists`] rather than silently
/// overwriting another mapping. That failure, not any earlier existence
/// read, is the authoritative collision signal.
#[async_trait]
pub trait MappingStore: Send + Sync + 'static {
    /// Inserts a new mapping only if no record exists for its short code.
    ///
    /// Returns `Err(AlreadyExists)` if the code is already taken.
    async fn put_if_absent(&self, mapping: &UrlMapping) -> Result<()>;

    /// Retrieves the mapping for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlMapping>>;

    /// Atomically increments the hit count of the record for `code` by one.
    ///
    /// Must use the backend's atomic add, never read-modify-write, so
    /// concurrent invocations never lose updates.
    async fn increment_hits(&self, code: &ShortCode) -> Result<()>;

    /// Probes backend reachability.
    async fn ping(&self) -> Result<()>;
}
