//! The contract a supervised entity satisfies.

use parking_lot::Mutex;
use std::sync::Arc;

/// An entity that a watchdog can degrade and destroy.
///
/// The watchdog drives three signals:
///
/// ```text
///            overflow > 0 (every tick)
/// Nominal ──────────────────────────────► Degraded
///    ▲       begin_or_continue_degraded()    │
///    │                                       │ back in tolerance
///    └───────────────────────────────────────┘ end_degraded() (once)
///
///  budget < 0 ──► destroy() (terminal)
/// ```
pub trait Destructible {
    /// Stable human-readable identity, used in destruction diagnostics.
    fn describe(&self) -> String;

    /// Called on every tick while the watchdog reports an overflow.
    ///
    /// Implementations may compound a degradation effect here and must
    /// tolerate long runs of consecutive calls.
    fn begin_or_continue_degraded(&mut self) {}

    /// Called once when the value returns to tolerance after a degraded
    /// episode. Restore anything `begin_or_continue_degraded` changed.
    fn end_degraded(&mut self) {}

    /// Irreversibly destroy the entity.
    fn destroy(&mut self);
}

impl<T: Destructible + ?Sized> Destructible for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn begin_or_continue_degraded(&mut self) {
        (**self).begin_or_continue_degraded();
    }

    fn end_degraded(&mut self) {
        (**self).end_degraded();
    }

    fn destroy(&mut self) {
        (**self).destroy();
    }
}

impl<T: Destructible + ?Sized> Destructible for &mut T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn begin_or_continue_degraded(&mut self) {
        (**self).begin_or_continue_degraded();
    }

    fn end_degraded(&mut self) {
        (**self).end_degraded();
    }

    fn destroy(&mut self) {
        (**self).destroy();
    }
}

/// Shared handle: the world keeps the entity, the watchdog drives it.
impl<T: Destructible + ?Sized> Destructible for Arc<Mutex<T>> {
    fn describe(&self) -> String {
        self.lock().describe()
    }

    fn begin_or_continue_degraded(&mut self) {
        self.lock().begin_or_continue_degraded();
    }

    fn end_degraded(&mut self) {
        self.lock().end_degraded();
    }

    fn destroy(&mut self) {
        self.lock().destroy();
    }
}
