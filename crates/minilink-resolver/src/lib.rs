//! Mapping resolution service.
//!
//! Resolves short codes to their original URLs with a cache-aside
//! lookup: cache first, durable store on miss, detached cache
//! repopulation and hit accounting afterwards.

pub mod accountant;
pub mod error;
pub mod service;

pub use accountant::HitAccountant;
pub use error::ResolveError;
pub use service::{HealthSummary, ResolutionService};
