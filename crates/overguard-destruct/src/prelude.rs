//! Prelude for overguard-destruct.

pub use crate::delayed::DelayedDestruction;
pub use crate::error::{DestructError, DestructResult};
pub use crate::explosion::WorldExplosion;
pub use crate::ratio::{RatioControl, RatioDriftFailure};
pub use crate::world::{Coordinate, World};
