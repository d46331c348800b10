//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use overguard_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_some, must_with};

#[cfg(feature = "mock")]
pub use crate::mock::{CallLog, RecordingDestructible, ScriptedValue, Signal, drive};

pub use crate::{assert_approx_eq, assert_strictly_decreasing};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
