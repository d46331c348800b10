//! Error types for the watchdog.
//!
//! The tick algorithm itself is total over the reals; every variant here is a
//! misuse of the API (unbound watchdog, inverted bounds, bad time step) that
//! is reported instead of being silently tolerated.

use thiserror::Error;

/// Errors that can occur while configuring or advancing a watchdog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WatchdogError {
    /// `advance` was called before any destructible was bound.
    #[error("Watchdog advanced without a bound destructible")]
    Unbound,

    /// Lower bound is above the upper bound (or one of them is NaN).
    #[error("Invalid bounds: min {min} > max {max}")]
    InvalidBounds {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },

    /// Negative or non-finite time step.
    #[error("Invalid elapsed time: {0}")]
    InvalidElapsed(f64),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl WatchdogError {
    /// Create an invalid bounds error.
    #[must_use]
    pub fn invalid_bounds(min: f64, max: f64) -> Self {
        Self::InvalidBounds { min, max }
    }

    /// Create an invalid elapsed time error.
    #[must_use]
    pub fn invalid_elapsed(elapsed: f64) -> Self {
        Self::InvalidElapsed(elapsed)
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = std::result::Result<T, WatchdogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WatchdogError::invalid_bounds(5.0, 1.0);
        assert!(err.to_string().contains("min 5"));
        assert!(err.to_string().contains("max 1"));

        let err = WatchdogError::invalid_elapsed(-0.5);
        assert!(err.to_string().contains("-0.5"));

        assert!(WatchdogError::Unbound.to_string().contains("bound"));
    }

    #[test]
    fn test_error_constructors() {
        let err = WatchdogError::invalid_configuration("timeout_reset must be positive");
        assert!(matches!(err, WatchdogError::InvalidConfiguration(_)));

        let err = WatchdogError::invalid_bounds(1.0, 0.0);
        assert!(matches!(err, WatchdogError::InvalidBounds { .. }));
    }
}
