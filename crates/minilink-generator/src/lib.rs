//! Short code candidate generation.
//!
//! Generators are pure: they never touch storage, so the codes they
//! produce are candidates, not reservations. Uniqueness is enforced by
//! the creation service through the store's conditional write.

pub mod random;

use minilink_core::ShortCode;

pub use random::RandomCodeGenerator;

/// Trait for producing short code candidates.
///
/// Implementations must emit codes in the fixed format (9 ASCII
/// alphanumeric characters) but make no uniqueness promise; with a
/// ~62^9 output space blind collisions are rare, not impossible.
pub trait CodeGenerator: Send + Sync + 'static {
    /// Produces a fresh candidate short code.
    fn generate(&self) -> ShortCode;
}
