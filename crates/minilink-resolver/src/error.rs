use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("no mapping for short code")]
    NotFound,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}
