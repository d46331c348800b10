//! Tolerance configuration for a single watchdog.

use serde::{Deserialize, Serialize};

use crate::error::{WatchdogError, WatchdogResult};

/// Bound magnitude used by [`WatchdogConfig::disabled`].
///
/// Any realistic monitored value sits far inside `[-1e8, 1e8]`, so a disabled
/// watchdog runs the same tick path without ever overflowing.
pub const DISABLED_BOUND: f64 = 1e8;

/// Timeout budget used by [`WatchdogConfig::disabled`].
pub const DISABLED_TIMEOUT_RESET: f64 = 1e7;

/// Default timeout budget, in seconds of unit overflow.
pub const DEFAULT_TIMEOUT_RESET: f64 = 2.0;

/// Tolerance bounds and escalation parameters for a watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Lower bound of the tolerated range.
    pub min: f64,
    /// Upper bound of the tolerated range.
    pub max: f64,
    /// Overflow margin forgiven before anything counts toward the integrator.
    pub overflow_tolerance: f64,
    /// Multiplier applied to the tolerated overflow when draining the budget.
    pub strength_per_overflow: f64,
    /// Ceiling and reset value of the timeout integrator.
    pub timeout_reset: f64,
    /// When false, an expired budget is logged instead of destroying the entity.
    pub destruction_enabled: bool,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            overflow_tolerance: 0.0,
            strength_per_overflow: 1.0,
            timeout_reset: DEFAULT_TIMEOUT_RESET,
            destruction_enabled: true,
        }
    }
}

impl WatchdogConfig {
    /// Configuration with the given tolerated range and default escalation.
    ///
    /// # Errors
    ///
    /// Returns an error if `min > max` or either bound is not finite.
    pub fn with_bounds(min: f64, max: f64) -> WatchdogResult<Self> {
        let config = Self {
            min,
            max,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sentinel "supervision off" configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            min: -DISABLED_BOUND,
            max: DISABLED_BOUND,
            timeout_reset: DISABLED_TIMEOUT_RESET,
            ..Self::default()
        }
    }

    /// Whether this configuration is the disabled sentinel.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.min <= -DISABLED_BOUND
            && self.max >= DISABLED_BOUND
            && self.timeout_reset >= DISABLED_TIMEOUT_RESET
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> WatchdogResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(WatchdogError::invalid_bounds(self.min, self.max));
        }
        if !self.overflow_tolerance.is_finite() || self.overflow_tolerance < 0.0 {
            return Err(WatchdogError::invalid_configuration(
                "overflow_tolerance must be finite and non-negative",
            ));
        }
        if !self.strength_per_overflow.is_finite() || self.strength_per_overflow < 0.0 {
            return Err(WatchdogError::invalid_configuration(
                "strength_per_overflow must be finite and non-negative",
            ));
        }
        if !self.timeout_reset.is_finite() || self.timeout_reset <= 0.0 {
            return Err(WatchdogError::invalid_configuration(
                "timeout_reset must be finite and greater than 0",
            ));
        }
        Ok(())
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> WatchdogConfigBuilder {
        WatchdogConfigBuilder::default()
    }
}

/// Builder for `WatchdogConfig`.
#[derive(Debug, Default)]
pub struct WatchdogConfigBuilder {
    config: WatchdogConfig,
}

impl WatchdogConfigBuilder {
    /// Set the tolerated range.
    #[must_use]
    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.config.min = min;
        self.config.max = max;
        self
    }

    /// Set the forgiven overflow margin.
    #[must_use]
    pub fn overflow_tolerance(mut self, tolerance: f64) -> Self {
        self.config.overflow_tolerance = tolerance;
        self
    }

    /// Set the overflow severity multiplier.
    #[must_use]
    pub fn strength_per_overflow(mut self, strength: f64) -> Self {
        self.config.strength_per_overflow = strength;
        self
    }

    /// Set the timeout budget.
    #[must_use]
    pub fn timeout_reset(mut self, budget: f64) -> Self {
        self.config.timeout_reset = budget;
        self
    }

    /// Enable or disable destruction when the budget runs out.
    #[must_use]
    pub fn destruction_enabled(mut self, enabled: bool) -> Self {
        self.config.destruction_enabled = enabled;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<WatchdogConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
