//! Transformer-style failure: the conversion ratio drifts while overloaded.

use overguard_watchdog::Destructible;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::explosion::WorldExplosion;
use crate::world::World;

/// Smallest factor applied to the ratio on one degraded tick.
pub const DRIFT_MIN: f64 = 0.7;

/// Largest factor applied to the ratio on one degraded tick.
pub const DRIFT_MAX: f64 = 1.3;

/// Access to an adjustable conversion ratio.
///
/// Anything with a ratio (grid transformer, pole-mounted transformer, ...)
/// implements this, so the failure logic never inspects concrete types.
pub trait RatioControl {
    /// Current ratio.
    fn ratio(&self) -> f64;

    /// Overwrite the ratio.
    fn set_ratio(&mut self, ratio: f64);
}

impl<T: RatioControl + ?Sized> RatioControl for Arc<Mutex<T>> {
    fn ratio(&self) -> f64 {
        self.lock().ratio()
    }

    fn set_ratio(&mut self, ratio: f64) {
        self.lock().set_ratio(ratio);
    }
}

/// Drifts a ratio while degraded and explodes on destruction.
///
/// On the first degraded tick of an episode the current ratio is remembered;
/// every degraded tick then multiplies it by a factor drawn from
/// `[DRIFT_MIN, DRIFT_MAX]`, so the error compounds. `end_degraded` restores
/// the remembered ratio.
#[derive(Debug)]
pub struct RatioDriftFailure<R, W> {
    control: R,
    explosion: WorldExplosion<W>,
    original_ratio: Option<f64>,
    rng: StdRng,
}

impl<R, W> RatioDriftFailure<R, W>
where
    R: RatioControl,
    W: World,
{
    /// Create a failure with a randomly seeded drift generator.
    #[must_use]
    pub fn new(control: R, explosion: WorldExplosion<W>) -> Self {
        Self::with_seed(control, explosion, rand::random())
    }

    /// Create a failure with a deterministic drift generator.
    #[must_use]
    pub fn with_seed(control: R, explosion: WorldExplosion<W>, seed: u64) -> Self {
        Self {
            control,
            explosion,
            original_ratio: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Ratio remembered at the start of the current episode, if any.
    #[must_use]
    pub fn original_ratio(&self) -> Option<f64> {
        self.original_ratio
    }

    /// The controlled ratio.
    #[must_use]
    pub fn control(&self) -> &R {
        &self.control
    }

    /// The explosion fired on destruction.
    #[must_use]
    pub fn explosion(&self) -> &WorldExplosion<W> {
        &self.explosion
    }
}

impl<R, W> Destructible for RatioDriftFailure<R, W>
where
    R: RatioControl,
    W: World,
{
    fn describe(&self) -> String {
        self.explosion.describe()
    }

    fn begin_or_continue_degraded(&mut self) {
        let current = self.control.ratio();
        if self.original_ratio.is_none() {
            self.original_ratio = Some(current);
        }
        let factor = self.rng.random_range(DRIFT_MIN..=DRIFT_MAX);
        self.control.set_ratio(current * factor);
        tracing::trace!(ratio = current * factor, factor, "Ratio drifting");
    }

    fn end_degraded(&mut self) {
        if let Some(original) = self.original_ratio.take() {
            self.control.set_ratio(original);
            tracing::debug!(ratio = original, "Ratio restored");
        }
    }

    fn destroy(&mut self) {
        self.explosion.destroy();
    }
}
