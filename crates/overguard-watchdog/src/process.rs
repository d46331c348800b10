//! Tick-driven processes and the list that drives them.
//!
//! A simulation owns one [`ProcessList`] and calls [`ProcessList::tick`] once
//! per step. Finished processes (a watchdog that fired destruction, a delayed
//! destruction that went off) are retired so they are never ticked again.

use crate::destructible::Destructible;
use crate::error::WatchdogResult;
use crate::source::ValueSource;
use crate::watchdog::Watchdog;

/// Something advanced once per simulation tick.
pub trait Process {
    /// Advance by `elapsed` time units.
    ///
    /// # Errors
    ///
    /// Returns an error if the process is misconfigured.
    fn process(&mut self, elapsed: f64) -> WatchdogResult<()>;

    /// Whether the process reached a terminal state and can be dropped.
    fn is_finished(&self) -> bool {
        false
    }
}

impl<S, D> Process for Watchdog<S, D>
where
    S: ValueSource,
    D: Destructible,
{
    fn process(&mut self, elapsed: f64) -> WatchdogResult<()> {
        self.advance(elapsed).map(|_| ())
    }

    fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }
}

/// Ordered collection of processes ticked together.
#[derive(Default)]
pub struct ProcessList {
    processes: Vec<Box<dyn Process>>,
}

impl ProcessList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a process; it is ticked after every process added before it.
    pub fn add<P>(&mut self, process: P)
    where
        P: Process + 'static,
    {
        self.processes.push(Box::new(process));
    }

    /// Number of live processes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether no process is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Tick every live process, then retire the finished ones.
    ///
    /// Returns the number of retired processes.
    ///
    /// # Errors
    ///
    /// Returns the first process error; processes after the failing one are
    /// not ticked and nothing is retired.
    pub fn tick(&mut self, elapsed: f64) -> WatchdogResult<usize> {
        for process in &mut self.processes {
            process.process(elapsed)?;
        }

        let before = self.processes.len();
        self.processes.retain(|process| !process.is_finished());
        let retired = before.saturating_sub(self.processes.len());
        if retired > 0 {
            tracing::debug!(retired, live = self.processes.len(), "Retired finished processes");
        }
        Ok(retired)
    }

    /// Drop every process.
    pub fn clear(&mut self) {
        self.processes.clear();
    }
}

impl std::fmt::Debug for ProcessList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessList")
            .field("live", &self.processes.len())
            .finish()
    }
}
