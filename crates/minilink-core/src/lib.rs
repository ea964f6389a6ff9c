//! Core types and traits for the minilink URL mapping service.
//!
//! This crate provides the shared domain types ([`ShortCode`],
//! [`UrlMapping`]) and the store/cache abstractions used by the
//! creation and resolution services.

pub mod cache;
pub mod error;
pub mod mapping;
pub mod shortcode;
pub mod store;

pub use cache::UrlCache;
pub use error::{CacheError, CoreError, StoreError};
pub use mapping::UrlMapping;
pub use shortcode::ShortCode;
pub use store::MappingStore;
