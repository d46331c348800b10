//! Monitored value sources.

use parking_lot::RwLock;
use std::sync::Arc;

/// Read-only view of the monitored quantity.
///
/// `read` is called exactly once per tick and must be cheap and free of side
/// effects. Any `Fn() -> f64` closure is a value source.
pub trait ValueSource {
    /// Current magnitude of the monitored quantity.
    fn read(&self) -> f64;
}

impl<F> ValueSource for F
where
    F: Fn() -> f64,
{
    fn read(&self) -> f64 {
        self()
    }
}

/// A value cell written by the simulation and read by a watchdog.
///
/// Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct SharedValue {
    inner: Arc<RwLock<f64>>,
}

impl SharedValue {
    /// Create a cell holding `initial`.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Publish a new value.
    pub fn set(&self, value: f64) {
        *self.inner.write() = value;
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        *self.inner.read()
    }
}

impl ValueSource for SharedValue {
    fn read(&self) -> f64 {
        self.get()
    }
}
