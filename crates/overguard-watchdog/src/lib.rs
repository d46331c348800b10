//! # overguard-watchdog
//!
//! Tick-based tolerance watchdog for simulated physical quantities.
//!
//! A [`Watchdog`] supervises one monitored value (temperature, voltage,
//! shaft speed, ...) against a tolerated range and escalates through two
//! independent channels on the bound [`Destructible`]:
//!
//! - a reversible **degraded** signal, raised every tick while the value is
//!   out of range and cancelled exactly once when it comes back;
//! - an irreversible **destruction**, fired when the integrated overflow
//!   beyond the tolerance margin exhausts the timeout budget.
//!
//! A one-shot grace token (the joker) hides the degraded signal on the first
//! tick of each excursion, and a per-instance jitter decorrelates the
//! destruction timing of identically configured watchdogs.
//!
//! ## Architecture
//!
//! - [`watchdog`] - Tick algorithm and runtime state
//! - [`config`] - Tolerance bounds, budget and the disabled sentinel
//! - [`destructible`] - Contract of the supervised entity
//! - [`source`] - Monitored value sources
//! - [`jitter`] - Injectable per-instance decay jitter
//! - [`process`] - Tick-driven processes and the list that drives them
//! - [`stats`] - Per-watchdog supervision statistics
//! - [`error`] - Watchdog-specific error types
//!
//! ## Example
//!
//! ```rust
//! use overguard_watchdog::prelude::*;
//!
//! struct Cable {
//!     melted: bool,
//! }
//!
//! impl Destructible for Cable {
//!     fn describe(&self) -> String {
//!         "copper cable".to_string()
//!     }
//!
//!     fn destroy(&mut self) {
//!         self.melted = true;
//!     }
//! }
//!
//! # fn main() -> WatchdogResult<()> {
//! let current = SharedValue::new(12.0);
//! let config = WatchdogConfig::builder()
//!     .bounds(-20.0, 20.0)
//!     .overflow_tolerance(1.0)
//!     .build()?;
//!
//! let mut watchdog = Watchdog::with_jitter(current.clone(), Jitter::seeded(7))
//!     .configure(config)?
//!     .bind(Cable { melted: false });
//!
//! let report = watchdog.advance(0.05)?;
//! assert!(report.is_quiet());
//!
//! current.set(400.0);
//! watchdog.advance(0.05)?;
//! assert!(watchdog.entity().is_some_and(|cable| cable.melted));
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod destructible;
pub mod error;
pub mod jitter;
pub mod process;
pub mod source;
pub mod stats;
pub mod watchdog;

pub mod prelude;

pub use config::{
    DEFAULT_TIMEOUT_RESET, DISABLED_BOUND, DISABLED_TIMEOUT_RESET, WatchdogConfig,
    WatchdogConfigBuilder,
};
pub use destructible::Destructible;
pub use error::{WatchdogError, WatchdogResult};
pub use jitter::{JITTER_MAX, JITTER_MIN, Jitter};
pub use process::{Process, ProcessList};
pub use source::{SharedValue, ValueSource};
pub use stats::WatchdogStats;
pub use watchdog::{TickReport, Watchdog, WatchdogStatus};
