//! # overguard-destruct
//!
//! Destructible entities for [`overguard_watchdog`] watchdogs.
//!
//! - [`explosion`] - Blow up (or clear) the failed entity's block
//! - [`ratio`] - Drift a conversion ratio while degraded, explode on destruction
//! - [`delayed`] - Defer a destruction to a later tick
//! - [`world`] - Coordinates and the world surface destructibles act on
//!
//! ## Example
//!
//! ```rust
//! use overguard_destruct::prelude::*;
//! use overguard_watchdog::prelude::*;
//!
//! #[derive(Default)]
//! struct Terrain {
//!     craters: usize,
//! }
//!
//! impl World for Terrain {
//!     fn explode(&mut self, _at: Coordinate, _strength: f32) {
//!         self.craters += 1;
//!     }
//!
//!     fn clear_block(&mut self, _at: Coordinate) {}
//! }
//!
//! # fn main() -> WatchdogResult<()> {
//! let mut terrain = Terrain::default();
//! let voltage = SharedValue::new(0.0);
//! let cable = WorldExplosion::new(&mut terrain, Coordinate::new(3, 64, 3, 0), "cable").cable();
//!
//! let mut watchdog = Watchdog::with_jitter(voltage.clone(), Jitter::NEUTRAL)
//!     .configure(WatchdogConfig::with_bounds(-100.0, 100.0)?)?
//!     .bind(cable);
//!
//! voltage.set(10_000.0);
//! watchdog.advance(0.05)?;
//! assert!(watchdog.status().is_terminal());
//! drop(watchdog);
//! assert_eq!(terrain.craters, 1);
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

pub mod delayed;
pub mod error;
pub mod explosion;
pub mod ratio;
pub mod world;

pub mod prelude;

pub use delayed::DelayedDestruction;
pub use error::{DestructError, DestructResult};
pub use explosion::{CABLE_STRENGTH, MACHINE_STRENGTH, WorldExplosion};
pub use ratio::{DRIFT_MAX, DRIFT_MIN, RatioControl, RatioDriftFailure};
pub use world::{Coordinate, World};
