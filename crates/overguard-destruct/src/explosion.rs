//! Destruction by explosion, or by silently removing the block.

use overguard_watchdog::Destructible;

use crate::error::{DestructError, DestructResult};
use crate::world::{Coordinate, World};

/// Explosion strength of an overloaded cable.
pub const CABLE_STRENGTH: f32 = 1.5;

/// Explosion strength of an overloaded machine.
pub const MACHINE_STRENGTH: f32 = 3.0;

/// Destroys an entity by blowing up its block.
///
/// With explosions disabled the block is cleared instead, so worlds that opt
/// out of terrain damage still lose the failed entity. Degraded signals are
/// ignored.
#[derive(Debug, Clone)]
pub struct WorldExplosion<W> {
    world: W,
    at: Coordinate,
    kind: String,
    strength: f32,
    explosions_enabled: bool,
}

impl<W: World> WorldExplosion<W> {
    /// Explosion of `kind` at `at`, with zero strength until a preset or an
    /// explicit strength is chosen.
    #[must_use]
    pub fn new(world: W, at: Coordinate, kind: impl Into<String>) -> Self {
        Self {
            world,
            at,
            kind: kind.into(),
            strength: 0.0,
            explosions_enabled: true,
        }
    }

    /// Use the cable preset.
    #[must_use]
    pub fn cable(mut self) -> Self {
        self.strength = CABLE_STRENGTH;
        self
    }

    /// Use the machine preset.
    #[must_use]
    pub fn machine(mut self) -> Self {
        self.strength = MACHINE_STRENGTH;
        self
    }

    /// Use an explicit strength.
    ///
    /// # Errors
    ///
    /// Returns an error if `strength` is negative or not finite.
    pub fn with_strength(mut self, strength: f32) -> DestructResult<Self> {
        if !strength.is_finite() || strength < 0.0 {
            return Err(DestructError::InvalidStrength(strength));
        }
        self.strength = strength;
        Ok(self)
    }

    /// Choose between a real explosion and clearing the block.
    #[must_use]
    pub fn explosions_enabled(mut self, enabled: bool) -> Self {
        self.explosions_enabled = enabled;
        self
    }

    /// Block that blows up.
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.at
    }

    /// Configured strength.
    #[must_use]
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// The world handle.
    #[must_use]
    pub fn world(&self) -> &W {
        &self.world
    }
}

impl<W: World> Destructible for WorldExplosion<W> {
    fn describe(&self) -> String {
        format!("{} ({})", self.kind, self.at)
    }

    fn destroy(&mut self) {
        if self.explosions_enabled {
            tracing::info!(
                kind = %self.kind,
                at = %self.at,
                strength = self.strength,
                "Exploding"
            );
            self.world.explode(self.at, self.strength);
        } else {
            tracing::info!(kind = %self.kind, at = %self.at, "Explosions disabled, clearing block");
            self.world.clear_block(self.at);
        }
    }
}
