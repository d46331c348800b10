//! Per-instance decay jitter.
//!
//! Every watchdog drains its budget at a slightly different rate so that many
//! identically configured watchdogs hit by the same excursion do not all fire
//! on the same tick. The rate is drawn once, at construction, from an
//! injectable random source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{WatchdogError, WatchdogResult};

/// Lower end of the jitter range.
pub const JITTER_MIN: f64 = 0.5;

/// Upper end of the jitter range.
pub const JITTER_MAX: f64 = 1.5;

/// Multiplier applied to the integrator drain of one watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Jitter(f64);

impl Jitter {
    /// Jitter that leaves the drain untouched.
    pub const NEUTRAL: Self = Self(1.0);

    /// Draw a rate uniformly from `[JITTER_MIN, JITTER_MAX]`.
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(JITTER_MIN..=JITTER_MAX))
    }

    /// Draw a rate from a deterministic generator seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// Draw a rate from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Use an explicit rate from `[JITTER_MIN, JITTER_MAX]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` lies outside the jitter range or is NaN.
    pub fn fixed(rate: f64) -> WatchdogResult<Self> {
        if !(JITTER_MIN..=JITTER_MAX).contains(&rate) {
            return Err(WatchdogError::invalid_configuration(format!(
                "jitter rate {rate} outside [{JITTER_MIN}, {JITTER_MAX}]"
            )));
        }
        Ok(Self(rate))
    }

    /// The multiplier value.
    #[must_use]
    pub fn rate(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Jitter {
    type Error = WatchdogError;

    fn try_from(rate: f64) -> WatchdogResult<Self> {
        Self::fixed(rate)
    }
}

impl From<Jitter> for f64 {
    fn from(jitter: Jitter) -> Self {
        jitter.0
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::random()
    }
}
