//! Mock destructibles and value drivers.

use std::collections::VecDeque;
use std::sync::Arc;

use overguard_watchdog::{
    Destructible, SharedValue, TickReport, ValueSource, Watchdog, WatchdogResult,
};
use parking_lot::Mutex;

/// A signal received by a [`RecordingDestructible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// `begin_or_continue_degraded` was called.
    Degraded,
    /// `end_degraded` was called.
    Recovered,
    /// `destroy` was called.
    Destroyed,
}

/// Shared, ordered log of the signals an entity received.
///
/// Clones observe the same log, so a test can keep one while the watchdog
/// owns the entity.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    signals: Arc<Mutex<Vec<Signal>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, signal: Signal) {
        self.signals.lock().push(signal);
    }

    /// Every signal received so far, in order.
    pub fn signals(&self) -> Vec<Signal> {
        self.signals.lock().clone()
    }

    pub fn count(&self, signal: Signal) -> usize {
        self.signals.lock().iter().filter(|s| **s == signal).count()
    }

    pub fn degraded_count(&self) -> usize {
        self.count(Signal::Degraded)
    }

    pub fn recovered_count(&self) -> usize {
        self.count(Signal::Recovered)
    }

    pub fn destroyed_count(&self) -> usize {
        self.count(Signal::Destroyed)
    }

    pub fn last(&self) -> Option<Signal> {
        self.signals.lock().last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.lock().is_empty()
    }

    pub fn clear(&self) {
        self.signals.lock().clear();
    }

    /// Whether every `Recovered` closes a run of at least one `Degraded`.
    pub fn is_lockstep(&self) -> bool {
        let mut in_episode = false;
        for signal in self.signals.lock().iter() {
            match signal {
                Signal::Degraded => in_episode = true,
                Signal::Recovered => {
                    if !in_episode {
                        return false;
                    }
                    in_episode = false;
                }
                Signal::Destroyed => {}
            }
        }
        true
    }
}

/// Destructible that records every signal into a [`CallLog`].
#[derive(Debug, Clone)]
pub struct RecordingDestructible {
    name: String,
    log: CallLog,
}

impl RecordingDestructible {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log: CallLog::new(),
        }
    }

    /// Handle on the shared log.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl Destructible for RecordingDestructible {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn begin_or_continue_degraded(&mut self) {
        self.log.push(Signal::Degraded);
    }

    fn end_degraded(&mut self) {
        self.log.push(Signal::Recovered);
    }

    fn destroy(&mut self) {
        self.log.push(Signal::Destroyed);
    }
}

/// Value source replaying a fixed script, one reading per call.
///
/// Once the script runs out the last reading repeats. Clones share the
/// cursor.
#[derive(Debug, Clone)]
pub struct ScriptedValue {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug)]
struct ScriptState {
    pending: VecDeque<f64>,
    last: f64,
    reads: usize,
}

impl ScriptedValue {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                pending: values.into_iter().collect(),
                last: 0.0,
                reads: 0,
            })),
        }
    }

    /// Append readings to the end of the script.
    pub fn extend(&self, values: impl IntoIterator<Item = f64>) {
        self.state.lock().pending.extend(values);
    }

    /// Readings not consumed yet.
    pub fn remaining(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Number of `read` calls so far.
    pub fn reads(&self) -> usize {
        self.state.lock().reads
    }
}

impl ValueSource for ScriptedValue {
    fn read(&self) -> f64 {
        let mut state = self.state.lock();
        state.reads += 1;
        if let Some(next) = state.pending.pop_front() {
            state.last = next;
        }
        state.last
    }
}

/// Feed `values` through `value`, advancing `watchdog` by `elapsed` after
/// each one, and collect the reports.
///
/// # Errors
///
/// Returns the first error reported by `advance`.
pub fn drive<D: Destructible>(
    watchdog: &mut Watchdog<SharedValue, D>,
    value: &SharedValue,
    values: &[f64],
    elapsed: f64,
) -> WatchdogResult<Vec<TickReport>> {
    values
        .iter()
        .map(|v| {
            value.set(*v);
            watchdog.advance(elapsed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_destructible_logs_in_order() {
        let mut entity = RecordingDestructible::new("sensor");
        let log = entity.log();

        entity.begin_or_continue_degraded();
        entity.begin_or_continue_degraded();
        entity.end_degraded();
        entity.destroy();

        assert_eq!(
            log.signals(),
            vec![
                Signal::Degraded,
                Signal::Degraded,
                Signal::Recovered,
                Signal::Destroyed
            ]
        );
        assert_eq!(log.degraded_count(), 2);
        assert_eq!(log.last(), Some(Signal::Destroyed));
        assert!(log.is_lockstep());
        assert_eq!(entity.describe(), "sensor");
    }

    #[test]
    fn test_scripted_value_repeats_last_reading() {
        let script = ScriptedValue::new([1.0, 2.0]);
        let shared = script.clone();
        assert_eq!(script.read().to_bits(), 1.0f64.to_bits());
        assert_eq!(shared.read().to_bits(), 2.0f64.to_bits());
        assert_eq!(script.read().to_bits(), 2.0f64.to_bits());
        assert_eq!(script.reads(), 3);
        assert_eq!(script.remaining(), 0);

        script.extend([7.5]);
        assert_eq!(script.read().to_bits(), 7.5f64.to_bits());
    }

    #[test]
    fn test_lockstep_detects_orphan_recovery() {
        let mut entity = RecordingDestructible::new("sensor");
        let log = entity.log();
        entity.end_degraded();
        assert!(!log.is_lockstep());

        log.clear();
        assert!(log.is_empty());
        entity.begin_or_continue_degraded();
        entity.end_degraded();
        entity.end_degraded();
        assert!(!log.is_lockstep());
    }
}
