//! Cache implementations for the `short code → original URL` projection.
//!
//! Both backends implement [`UrlCache`] with per-key TTLs: Moka for
//! single-node and test deployments, Redis for shared deployments.
//!
//! [`UrlCache`]: minilink_core::UrlCache

pub mod moka;
pub mod redis;

pub use moka::MokaUrlCache;
pub use redis::RedisUrlCache;
