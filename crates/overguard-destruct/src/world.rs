//! World coordinates and the actuation surface destructibles act on.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Block position in a dimension of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
    /// Dimension identifier.
    pub dimension: i32,
}

impl Coordinate {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32, dimension: i32) -> Self {
        Self { x, y, z, dimension }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "x={} y={} z={} dim={}",
            self.x, self.y, self.z, self.dimension
        )
    }
}

/// The parts of the world a destructible may change.
pub trait World {
    /// Detonate an explosion of `strength` centred on `at`.
    fn explode(&mut self, at: Coordinate, strength: f32);

    /// Replace the block at `at` with air.
    fn clear_block(&mut self, at: Coordinate);
}

impl<W: World + ?Sized> World for Arc<Mutex<W>> {
    fn explode(&mut self, at: Coordinate, strength: f32) {
        self.lock().explode(at, strength);
    }

    fn clear_block(&mut self, at: Coordinate) {
        self.lock().clear_block(at);
    }
}

impl<W: World + ?Sized> World for &mut W {
    fn explode(&mut self, at: Coordinate, strength: f32) {
        (**self).explode(at, strength);
    }

    fn clear_block(&mut self, at: Coordinate) {
        (**self).clear_block(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display() {
        let at = Coordinate::new(12, 64, -3, 0);
        assert_eq!(at.to_string(), "x=12 y=64 z=-3 dim=0");
    }
}
