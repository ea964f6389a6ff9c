//! Mapping creation service.
//!
//! Generates a unique short code, persists the mapping through the
//! store's conditional write, and seeds the cache best-effort.

pub mod error;
pub mod service;

pub use error::CreateError;
pub use service::{CreatedMapping, CreationService};
