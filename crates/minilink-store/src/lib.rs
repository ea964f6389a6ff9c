//! Mapping store implementations.
//!
//! The durable backend in production deployments is an external
//! key-value service reached through the [`MappingStore`] trait; this
//! crate ships the in-memory implementation used for local runs and
//! tests.
//!
//! [`MappingStore`]: minilink_core::MappingStore

pub mod memory;

pub use memory::InMemoryMappingStore;
