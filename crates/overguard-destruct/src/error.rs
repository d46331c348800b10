//! Error types for destructible construction.

use thiserror::Error;

/// Errors raised while building a destructible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DestructError {
    /// Explosion strength is negative or not finite.
    #[error("Invalid explosion strength: {0}")]
    InvalidStrength(f32),

    /// Destruction delay is negative or not finite.
    #[error("Invalid destruction delay: {0}")]
    InvalidDelay(f64),
}

/// A specialized `Result` type for destructible construction.
pub type DestructResult<T> = std::result::Result<T, DestructError>;
