//! Per-watchdog supervision statistics.
//!
//! Counters only grow; they are updated once per tick and never allocate.

use serde::{Deserialize, Serialize};

/// Supervision statistics for one watchdog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchdogStats {
    /// Total number of processed ticks.
    pub ticks: u64,
    /// Ticks whose overflow exceeded the tolerance margin.
    pub overflow_ticks: u64,
    /// Grace tokens spent.
    pub jokers_spent: u32,
    /// Ticks on which the degraded signal was raised.
    pub degraded_ticks: u64,
    /// Degraded episodes started.
    pub degraded_episodes: u32,
    /// Lowest integrator value observed, if any tick ran.
    pub lowest_timeout: Option<f64>,
    /// Expired budgets that were logged instead of destroying the entity.
    pub suppressed_destructions: u32,
    /// Whether destruction has fired.
    pub destroyed: bool,
}

impl WatchdogStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one processed tick and the integrator value it left behind.
    pub fn record_tick(&mut self, timeout: f64, overflowing: bool) {
        self.ticks = self.ticks.saturating_add(1);
        if overflowing {
            self.overflow_ticks = self.overflow_ticks.saturating_add(1);
        }
        self.lowest_timeout = Some(match self.lowest_timeout {
            Some(lowest) => lowest.min(timeout),
            None => timeout,
        });
    }

    /// Record a consumed grace token.
    pub fn record_joker(&mut self) {
        self.jokers_spent = self.jokers_spent.saturating_add(1);
    }

    /// Record a degraded tick; `episode_start` marks the rising edge.
    pub fn record_degraded(&mut self, episode_start: bool) {
        self.degraded_ticks = self.degraded_ticks.saturating_add(1);
        if episode_start {
            self.degraded_episodes = self.degraded_episodes.saturating_add(1);
        }
    }

    /// Fraction of ticks spent beyond the tolerance margin, in percent.
    ///
    /// Returns 0.0 if no ticks have been recorded.
    #[must_use]
    pub fn overflow_rate(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            (self.overflow_ticks as f64 / self.ticks as f64) * 100.0
        }
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tick_tracks_lowest_timeout() {
        let mut stats = WatchdogStats::new();
        assert!(stats.lowest_timeout.is_none());

        stats.record_tick(2.0, false);
        stats.record_tick(0.5, true);
        stats.record_tick(1.5, true);

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.overflow_ticks, 2);
        assert_eq!(stats.lowest_timeout, Some(0.5));
    }

    #[test]
    fn test_overflow_rate() {
        let mut stats = WatchdogStats::new();
        assert!(stats.overflow_rate().abs() < f64::EPSILON);

        stats.record_tick(1.0, true);
        stats.record_tick(1.0, false);
        assert!((stats.overflow_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degraded_episode_counting() {
        let mut stats = WatchdogStats::new();
        stats.record_degraded(true);
        stats.record_degraded(false);
        stats.record_degraded(false);
        stats.record_degraded(true);

        assert_eq!(stats.degraded_ticks, 4);
        assert_eq!(stats.degraded_episodes, 2);
    }

    #[test]
    fn test_reset() {
        let mut stats = WatchdogStats::new();
        stats.record_tick(1.0, true);
        stats.record_joker();
        stats.destroyed = true;
        stats.reset();
        assert_eq!(stats, WatchdogStats::default());
    }
}
