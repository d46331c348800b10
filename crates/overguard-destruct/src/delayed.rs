//! Destruction deferred by a delay.

use overguard_watchdog::{Destructible, Process, WatchdogError, WatchdogResult};

use crate::error::{DestructError, DestructResult};

/// Destroys its target once a delay has elapsed.
///
/// Each tick subtracts the elapsed time from the remaining delay and fires as
/// soon as it reaches zero, so even a zero delay waits for the next tick
/// instead of destroying in the middle of the current one. Register it in a
/// [`ProcessList`](overguard_watchdog::ProcessList); it retires itself after
/// firing.
#[derive(Debug)]
pub struct DelayedDestruction<D> {
    target: D,
    remaining: f64,
    fired: bool,
}

impl<D: Destructible> DelayedDestruction<D> {
    /// Schedule destruction of `target` after `delay` time units.
    ///
    /// # Errors
    ///
    /// Returns an error if `delay` is negative or not finite.
    pub fn new(target: D, delay: f64) -> DestructResult<Self> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(DestructError::InvalidDelay(delay));
        }
        Ok(Self {
            target,
            remaining: delay,
            fired: false,
        })
    }

    /// Time left before destruction.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.remaining.max(0.0)
    }

    /// Whether the target has been destroyed.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// The scheduled target.
    #[must_use]
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Give the target back, cancelling destruction if it has not fired.
    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D: Destructible> Process for DelayedDestruction<D> {
    fn process(&mut self, elapsed: f64) -> WatchdogResult<()> {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return Err(WatchdogError::invalid_elapsed(elapsed));
        }
        if self.fired {
            return Ok(());
        }

        self.remaining -= elapsed;
        if self.remaining <= 0.0 {
            tracing::warn!(entity = %self.target.describe(), "Delayed destruction firing");
            self.target.destroy();
            self.fired = true;
        }
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Boiler {
        destroyed: u32,
    }

    impl Destructible for Boiler {
        fn describe(&self) -> String {
            "boiler".to_string()
        }

        fn destroy(&mut self) {
            self.destroyed += 1;
        }
    }

    #[test]
    fn test_zero_delay_fires_on_next_tick() -> WatchdogResult<()> {
        let mut delayed = DelayedDestruction::new(Boiler::default(), 0.0)
            .map_err(|e| WatchdogError::invalid_configuration(e.to_string()))?;
        assert!(!delayed.is_fired());
        assert_eq!(delayed.target().destroyed, 0);

        delayed.process(0.05)?;
        assert!(delayed.is_fired());
        assert!(delayed.is_finished());
        assert_eq!(delayed.target().destroyed, 1);
        Ok(())
    }

    #[test]
    fn test_fires_once_after_delay() -> WatchdogResult<()> {
        let mut delayed = DelayedDestruction::new(Boiler::default(), 1.0)
            .map_err(|e| WatchdogError::invalid_configuration(e.to_string()))?;

        delayed.process(0.25)?;
        delayed.process(0.25)?;
        delayed.process(0.25)?;
        assert!(!delayed.is_fired());
        assert!((delayed.remaining() - 0.25).abs() < 1e-12);

        delayed.process(0.25)?;
        assert!(delayed.is_fired());
        delayed.process(0.25)?;
        assert_eq!(delayed.into_inner().destroyed, 1);
        Ok(())
    }

    #[test]
    fn test_invalid_delay_rejected() {
        assert!(matches!(
            DelayedDestruction::new(Boiler::default(), -1.0),
            Err(DestructError::InvalidDelay(_))
        ));
        assert!(DelayedDestruction::new(Boiler::default(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_negative_elapsed_rejected() -> WatchdogResult<()> {
        let mut delayed = DelayedDestruction::new(Boiler::default(), 1.0)
            .map_err(|e| WatchdogError::invalid_configuration(e.to_string()))?;
        assert!(delayed.process(-0.1).is_err());
        Ok(())
    }
}
