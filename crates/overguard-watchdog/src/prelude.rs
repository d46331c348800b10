//! Prelude for overguard-watchdog.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use overguard_watchdog::prelude::*;
//!
//! let config = WatchdogConfig::disabled();
//! assert!(config.validate().is_ok());
//! ```

pub use crate::config::{WatchdogConfig, WatchdogConfigBuilder};
pub use crate::destructible::Destructible;
pub use crate::error::{WatchdogError, WatchdogResult};
pub use crate::jitter::Jitter;
pub use crate::process::{Process, ProcessList};
pub use crate::source::{SharedValue, ValueSource};
pub use crate::stats::WatchdogStats;
pub use crate::watchdog::{TickReport, Watchdog, WatchdogStatus};
