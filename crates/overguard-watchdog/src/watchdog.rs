//! Core tolerance watchdog.
//!
//! A `Watchdog` reads one monitored value per tick and escalates through two
//! channels: a reversible degraded signal raised while the value is out of
//! tolerance, and an irreversible destruction fired once the integrated,
//! tolerance-adjusted overflow exhausts the timeout budget.

use serde::{Deserialize, Serialize};

use crate::config::{DISABLED_BOUND, DISABLED_TIMEOUT_RESET, WatchdogConfig};
use crate::destructible::Destructible;
use crate::error::{WatchdogError, WatchdogResult};
use crate::jitter::Jitter;
use crate::source::ValueSource;
use crate::stats::WatchdogStats;

/// Supervision state of a watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WatchdogStatus {
    /// Value within tolerance, or a degraded episode never started.
    #[default]
    Nominal,
    /// A degraded episode is active.
    Degraded,
    /// Destruction fired. Terminal.
    Destroyed,
}

impl WatchdogStatus {
    /// Check if the watchdog reached its terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Destroyed)
    }

    /// Get the status as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nominal => "Nominal",
            Self::Degraded => "Degraded",
            Self::Destroyed => "Destroyed",
        }
    }
}

impl std::fmt::Display for WatchdogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened during one call to [`Watchdog::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Value read from the source (0.0 when the tick was skipped).
    pub value: f64,
    /// Reported overflow, after the joker adjustment.
    pub overflow: f64,
    /// Overflow beyond the tolerance margin; this drains the budget.
    pub tolerated_overflow: f64,
    /// Integrator value after the tick.
    pub timeout: f64,
    /// The grace token was spent on this tick.
    pub joker_consumed: bool,
    /// `begin_or_continue_degraded` was called.
    pub degraded: bool,
    /// `end_degraded` was called.
    pub recovered: bool,
    /// `destroy` was called.
    pub destroyed: bool,
}

impl TickReport {
    /// True when no signal reached the destructible.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        !self.degraded && !self.recovered && !self.destroyed
    }
}

/// Tolerance watchdog bound to one destructible entity.
///
/// # Tick algorithm
///
/// 1. Lazy init of the integrator on the first tick (and after [`reset`]).
/// 2. `overflow = max(value - max, min - value)`.
/// 3. `tolerated = max(overflow - overflow_tolerance, 0)`.
/// 4. The first tick with `tolerated > 0` spends the joker and reports no
///    overflow; the joker recharges as soon as `tolerated == 0`.
/// 5. `timeout -= elapsed * tolerated * strength * jitter` (a NaN drain, from
///    an infinite reading times a zero factor, is skipped), clamped to
///    `timeout_reset`; below zero the entity is destroyed.
/// 6. Positive reported overflow raises the degraded signal every tick; the
///    first tick without it cancels the episode exactly once.
///
/// The joker only hides the degraded signal. The integrator is still drained
/// by `tolerated` on the forgiven tick.
///
/// [`reset`]: Watchdog::reset
pub struct Watchdog<S, D> {
    config: WatchdogConfig,
    source: S,
    entity: Option<D>,
    jitter: Jitter,
    timeout: f64,
    boot_pending: bool,
    joker_available: bool,
    in_failure_state: bool,
    status: WatchdogStatus,
    stats: WatchdogStats,
}

impl<S, D> Watchdog<S, D>
where
    S: ValueSource,
    D: Destructible,
{
    /// Create a watchdog with default bounds and a jitter drawn from the
    /// thread-local generator.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_jitter(source, Jitter::random())
    }

    /// Create a watchdog with an injected jitter.
    #[must_use]
    pub fn with_jitter(source: S, jitter: Jitter) -> Self {
        Self {
            config: WatchdogConfig::default(),
            source,
            entity: None,
            jitter,
            timeout: 0.0,
            boot_pending: true,
            joker_available: true,
            in_failure_state: false,
            status: WatchdogStatus::Nominal,
            stats: WatchdogStats::new(),
        }
    }

    /// Apply a configuration, fluently.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn configure(mut self, config: WatchdogConfig) -> WatchdogResult<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    /// Bind the supervised entity, replacing any previous binding.
    #[must_use]
    pub fn bind(mut self, entity: D) -> Self {
        self.rebind(entity);
        self
    }

    /// Bind the supervised entity in place, returning the previous one.
    pub fn rebind(&mut self, entity: D) -> Option<D> {
        self.entity.replace(entity)
    }

    /// Replace the configuration.
    ///
    /// The integrator is not reinitialized; call [`Watchdog::reset`] to
    /// restart the budget under the new ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn set_config(&mut self, config: WatchdogConfig) -> WatchdogResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Set the tolerated range.
    ///
    /// # Errors
    ///
    /// Returns an error if `min > max` or either bound is not finite.
    pub fn set_bounds(&mut self, min: f64, max: f64) -> WatchdogResult<()> {
        self.set_config(WatchdogConfig {
            min,
            max,
            ..self.config
        })
    }

    /// Set the forgiven overflow margin.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is negative or not finite.
    pub fn set_overflow_tolerance(&mut self, tolerance: f64) -> WatchdogResult<()> {
        self.set_config(WatchdogConfig {
            overflow_tolerance: tolerance,
            ..self.config
        })
    }

    /// Set the timeout budget.
    ///
    /// # Errors
    ///
    /// Returns an error if `budget` is not strictly positive and finite.
    pub fn set_timeout_reset(&mut self, budget: f64) -> WatchdogResult<()> {
        self.set_config(WatchdogConfig {
            timeout_reset: budget,
            ..self.config
        })
    }

    /// Enable or disable destruction when the budget runs out.
    pub fn set_destruction_enabled(&mut self, enabled: bool) {
        self.config.destruction_enabled = enabled;
    }

    /// Neuter supervision with the sentinel bounds and budget.
    ///
    /// The tick path keeps running; realistic values never overflow.
    pub fn disable(&mut self) -> &mut Self {
        self.config.min = -DISABLED_BOUND;
        self.config.max = DISABLED_BOUND;
        self.config.timeout_reset = DISABLED_TIMEOUT_RESET;
        self
    }

    /// Restart the timeout budget on the next tick.
    pub fn reset(&mut self) {
        self.boot_pending = true;
    }

    /// Advance supervision by `elapsed` time units.
    ///
    /// Reads the value source once and may call `destroy`,
    /// `begin_or_continue_degraded` and `end_degraded` on the bound entity,
    /// in that order. Once destruction fired, further ticks do nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if no entity is bound or `elapsed` is negative or
    /// not finite.
    pub fn advance(&mut self, elapsed: f64) -> WatchdogResult<TickReport> {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return Err(WatchdogError::invalid_elapsed(elapsed));
        }
        let Some(entity) = self.entity.as_mut() else {
            return Err(WatchdogError::Unbound);
        };
        if self.status.is_terminal() {
            return Ok(TickReport {
                timeout: self.timeout,
                ..TickReport::default()
            });
        }

        if self.boot_pending {
            self.boot_pending = false;
            self.timeout = self.config.timeout_reset;
        }

        let value = self.source.read();
        let mut overflow = (value - self.config.max).max(self.config.min - value);
        let tolerated_overflow = (overflow - self.config.overflow_tolerance).max(0.0);

        let mut report = TickReport {
            value,
            tolerated_overflow,
            ..TickReport::default()
        };

        if tolerated_overflow > 0.0 {
            if self.joker_available {
                self.joker_available = false;
                overflow = 0.0;
                report.joker_consumed = true;
                self.stats.record_joker();
            }
        } else {
            self.joker_available = true;
        }

        // 0 * inf is NaN; a NaN drain must not poison the integrator.
        let drain =
            elapsed * tolerated_overflow * self.config.strength_per_overflow * self.jitter.rate();
        if drain > 0.0 {
            self.timeout -= drain;
        }
        if self.timeout > self.config.timeout_reset {
            self.timeout = self.config.timeout_reset;
        }

        if self.timeout < 0.0 {
            let description = entity.describe();
            if self.config.destruction_enabled {
                tracing::warn!(
                    entity = %description,
                    value,
                    timeout = self.timeout,
                    "Watchdog budget exhausted, destroying entity"
                );
                entity.destroy();
                self.status = WatchdogStatus::Destroyed;
                self.stats.destroyed = true;
                report.destroyed = true;
            } else {
                tracing::warn!(
                    entity = %description,
                    value,
                    timeout = self.timeout,
                    "Watchdog budget exhausted, destruction suppressed by configuration"
                );
                self.stats.suppressed_destructions =
                    self.stats.suppressed_destructions.saturating_add(1);
            }
        }

        if overflow > 0.0 {
            let episode_start = !self.in_failure_state;
            if episode_start {
                tracing::debug!(value, overflow, "Degraded episode started");
            }
            entity.begin_or_continue_degraded();
            self.in_failure_state = true;
            self.stats.record_degraded(episode_start);
            report.degraded = true;
        } else if self.in_failure_state {
            tracing::debug!(value, "Degraded episode ended");
            entity.end_degraded();
            self.in_failure_state = false;
            report.recovered = true;
        }

        if !self.status.is_terminal() {
            self.status = if self.in_failure_state {
                WatchdogStatus::Degraded
            } else {
                WatchdogStatus::Nominal
            };
        }

        report.overflow = overflow;
        report.timeout = self.timeout;
        self.stats.record_tick(self.timeout, tolerated_overflow > 0.0);

        tracing::trace!(
            value,
            overflow,
            tolerated_overflow,
            timeout = self.timeout,
            "Watchdog tick"
        );

        Ok(report)
    }
}

impl<S, D> Watchdog<S, D> {
    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    /// Live integrator value.
    #[must_use]
    pub fn timeout(&self) -> f64 {
        self.timeout
    }

    /// Integrator ceiling.
    #[must_use]
    pub fn timeout_reset(&self) -> f64 {
        self.config.timeout_reset
    }

    /// Per-instance drain multiplier.
    #[must_use]
    pub fn jitter_rate(&self) -> f64 {
        self.jitter.rate()
    }

    /// Whether the grace token is still available.
    #[must_use]
    pub fn is_joker_available(&self) -> bool {
        self.joker_available
    }

    /// Whether a degraded episode is active.
    #[must_use]
    pub fn is_in_failure_state(&self) -> bool {
        self.in_failure_state
    }

    /// Whether the integrator will be reinitialized on the next tick.
    #[must_use]
    pub fn is_boot_pending(&self) -> bool {
        self.boot_pending
    }

    /// Current supervision status.
    #[must_use]
    pub fn status(&self) -> WatchdogStatus {
        self.status
    }

    /// Supervision statistics.
    #[must_use]
    pub fn stats(&self) -> &WatchdogStats {
        &self.stats
    }

    /// Whether an entity is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.entity.is_some()
    }

    /// The bound entity, if any.
    #[must_use]
    pub fn entity(&self) -> Option<&D> {
        self.entity.as_ref()
    }

    /// The bound entity, mutably.
    pub fn entity_mut(&mut self) -> Option<&mut D> {
        self.entity.as_mut()
    }

    /// Detach and return the bound entity.
    pub fn unbind(&mut self) -> Option<D> {
        self.entity.take()
    }

    /// The value source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, D> std::fmt::Debug for Watchdog<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchdog")
            .field("config", &self.config)
            .field("jitter", &self.jitter)
            .field("timeout", &self.timeout)
            .field("boot_pending", &self.boot_pending)
            .field("joker_available", &self.joker_available)
            .field("in_failure_state", &self.in_failure_state)
            .field("status", &self.status)
            .field("bound", &self.entity.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SharedValue;
    use overguard_test_helpers::must_some;

    #[derive(Debug, Default)]
    struct Boiler {
        degraded: u32,
        recovered: u32,
        destroyed: u32,
    }

    impl Destructible for Boiler {
        fn describe(&self) -> String {
            "sensor".to_string()
        }

        fn begin_or_continue_degraded(&mut self) {
            self.degraded += 1;
        }

        fn end_degraded(&mut self) {
            self.recovered += 1;
        }

        fn destroy(&mut self) {
            self.destroyed += 1;
        }
    }

    fn watchdog(value: &SharedValue) -> WatchdogResult<Watchdog<SharedValue, Boiler>> {
        let config = WatchdogConfig::builder()
            .bounds(0.0, 10.0)
            .overflow_tolerance(1.0)
            .timeout_reset(2.0)
            .build()?;
        Ok(Watchdog::with_jitter(value.clone(), Jitter::NEUTRAL)
            .configure(config)?
            .bind(Boiler::default()))
    }

    fn boiler(watchdog: &Watchdog<SharedValue, Boiler>) -> &Boiler {
        must_some(watchdog.entity(), "boiler must be bound")
    }

    #[test]
    fn test_unbound_watchdog_fails_fast() {
        let mut watchdog: Watchdog<_, Boiler> = Watchdog::with_jitter(|| 0.0, Jitter::NEUTRAL);
        assert_eq!(watchdog.advance(1.0), Err(WatchdogError::Unbound));
    }

    #[test]
    fn test_invalid_elapsed_rejected() -> WatchdogResult<()> {
        let value = SharedValue::new(5.0);
        let mut watchdog = watchdog(&value)?;
        assert!(matches!(
            watchdog.advance(-1.0),
            Err(WatchdogError::InvalidElapsed(_))
        ));
        assert!(matches!(
            watchdog.advance(f64::NAN),
            Err(WatchdogError::InvalidElapsed(_))
        ));
        Ok(())
    }

    #[test]
    fn test_lazy_boot_honors_late_configuration() -> WatchdogResult<()> {
        let value = SharedValue::new(5.0);
        let mut watchdog = watchdog(&value)?;
        watchdog.set_timeout_reset(7.0)?;
        assert!(watchdog.is_boot_pending());

        let report = watchdog.advance(1.0)?;
        assert!((report.timeout - 7.0).abs() < f64::EPSILON);
        assert!(!watchdog.is_boot_pending());
        Ok(())
    }

    #[test]
    fn test_in_range_tick_is_quiet() -> WatchdogResult<()> {
        let value = SharedValue::new(5.0);
        let mut watchdog = watchdog(&value)?;
        let report = watchdog.advance(1.0)?;

        assert!(report.is_quiet());
        assert!(report.overflow < 0.0);
        assert!(report.tolerated_overflow.abs() < f64::EPSILON);
        assert_eq!(watchdog.status(), WatchdogStatus::Nominal);
        Ok(())
    }

    #[test]
    fn test_overflow_within_margin_is_forgiven() -> WatchdogResult<()> {
        let value = SharedValue::new(10.5);
        let mut watchdog = watchdog(&value)?;

        for _ in 0..10 {
            let report = watchdog.advance(1.0)?;
            assert!(report.tolerated_overflow.abs() < f64::EPSILON);
            assert!((report.timeout - 2.0).abs() < f64::EPSILON);
            assert!(!report.joker_consumed);
        }
        // The margin spares the budget and the joker, not the degraded signal.
        assert!(watchdog.is_joker_available());
        assert_eq!(boiler(&watchdog).degraded, 10);
        assert_eq!(boiler(&watchdog).destroyed, 0);
        Ok(())
    }

    #[test]
    fn test_lower_bound_excursion() -> WatchdogResult<()> {
        let value = SharedValue::new(-3.0);
        let mut watchdog = watchdog(&value)?;

        let first = watchdog.advance(0.5)?;
        assert!(first.joker_consumed);
        assert!((first.tolerated_overflow - 2.0).abs() < f64::EPSILON);

        let second = watchdog.advance(0.5)?;
        assert!(second.degraded);
        assert!((second.overflow - 3.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_destruction_is_terminal() -> WatchdogResult<()> {
        let value = SharedValue::new(100.0);
        let mut watchdog = watchdog(&value)?;

        let mut destroyed_on = None;
        for tick in 0..5 {
            let report = watchdog.advance(1.0)?;
            if report.destroyed {
                destroyed_on = Some(tick);
                break;
            }
        }
        assert_eq!(destroyed_on, Some(0));
        assert_eq!(watchdog.status(), WatchdogStatus::Destroyed);

        value.set(5.0);
        watchdog.reset();
        let report = watchdog.advance(1.0)?;
        assert!(report.is_quiet());
        assert_eq!(boiler(&watchdog).destroyed, 1);
        Ok(())
    }

    #[test]
    fn test_destruction_suppressed_by_config() -> WatchdogResult<()> {
        let value = SharedValue::new(100.0);
        let mut watchdog = watchdog(&value)?;
        watchdog.set_destruction_enabled(false);

        for _ in 0..5 {
            let report = watchdog.advance(1.0)?;
            assert!(!report.destroyed);
        }
        assert_eq!(boiler(&watchdog).destroyed, 0);
        assert_eq!(watchdog.stats().suppressed_destructions, 5);
        assert_eq!(watchdog.status(), WatchdogStatus::Degraded);
        Ok(())
    }

    #[test]
    fn test_rebind_returns_previous_entity() -> WatchdogResult<()> {
        let value = SharedValue::new(5.0);
        let mut watchdog = watchdog(&value)?;
        let previous = watchdog.rebind(Boiler::default());
        assert!(previous.is_some());
        assert!(watchdog.is_bound());

        assert!(watchdog.unbind().is_some());
        assert_eq!(watchdog.advance(1.0), Err(WatchdogError::Unbound));
        Ok(())
    }

    #[test]
    fn test_set_bounds_rejects_inverted_range() -> WatchdogResult<()> {
        let value = SharedValue::new(5.0);
        let mut watchdog = watchdog(&value)?;
        assert!(matches!(
            watchdog.set_bounds(10.0, 0.0),
            Err(WatchdogError::InvalidBounds { .. })
        ));
        // Previous configuration is kept.
        assert!((watchdog.config().max - 10.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_infinite_reading_at_zero_elapsed_keeps_budget_finite() -> WatchdogResult<()> {
        let value = SharedValue::new(f64::INFINITY);
        let mut watchdog = watchdog(&value)?;

        let report = watchdog.advance(0.0)?;
        assert!(report.joker_consumed);
        assert!((report.timeout - 2.0).abs() < f64::EPSILON);

        value.set(1.0e6);
        let report = watchdog.advance(1.0)?;
        assert!(report.destroyed);
        assert_eq!(boiler(&watchdog).destroyed, 1);
        Ok(())
    }

    #[test]
    fn test_infinite_reading_with_zero_strength_keeps_budget_finite() -> WatchdogResult<()> {
        let value = SharedValue::new(f64::INFINITY);
        let mut watchdog = watchdog(&value)?;
        watchdog.set_config(WatchdogConfig {
            strength_per_overflow: 0.0,
            ..*watchdog.config()
        })?;

        for _ in 0..3 {
            let report = watchdog.advance(1.0)?;
            assert!(report.timeout.is_finite());
        }

        watchdog.set_config(WatchdogConfig {
            strength_per_overflow: 1.0,
            ..*watchdog.config()
        })?;
        value.set(50.0);
        let report = watchdog.advance(1.0)?;
        assert!(report.destroyed);
        Ok(())
    }

    #[test]
    fn test_status_display() {
        assert_eq!(WatchdogStatus::Degraded.to_string(), "Degraded");
        assert!(WatchdogStatus::Destroyed.is_terminal());
        assert!(!WatchdogStatus::Nominal.is_terminal());
    }
}
