//! World configuration
//!
//! Every tunable of the simulation lives here: viewport, background, the firework that a
//! click spawns, population bounds and the nominal refresh rate. Defaults reproduce the
//! stock behavior (speed 5, 20 red particles, radius 5, lifespan 100, trail of 10,
//! gravity 0.1 px/tick², black background, 60 Hz).

use crate::core_types::{Color, Vector2};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

const fn ticks(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(v) => v,
        None => panic!("tick count must be non-zero"),
    }
}

pub const DEFAULT_SPEED: f64 = 5.0;
pub const DEFAULT_AMOUNT: u32 = 20;
pub const DEFAULT_PARTICLE_RADIUS: f64 = 5.0;
pub const DEFAULT_PARTICLE_LIFESPAN: NonZeroU32 = ticks(100);
pub const DEFAULT_TRAIL_LENGTH: NonZeroU32 = ticks(10);
pub const DEFAULT_GRAVITY: Vector2 = Vector2::new(0.0, 0.1);
pub const DEFAULT_REFRESH_RATE_HZ: f64 = 60.0;

/// Parameters of one burst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkConfig {
    /// Initial particle speed (px/tick)
    pub speed: f64,
    /// Particles per burst
    pub amount: u32,
    pub color: Color,
    pub particle_radius: f64,
    pub particle_lifespan: NonZeroU32,
    /// Trail capacity; also the lifespan of each smoke segment
    pub trail_length: NonZeroU32,
    /// Acceleration applied to every particle each tick (px/tick²)
    pub gravity: Vector2,
}

impl Default for FireworkConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            amount: DEFAULT_AMOUNT,
            color: Color::RED,
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            particle_lifespan: DEFAULT_PARTICLE_LIFESPAN,
            trail_length: DEFAULT_TRAIL_LENGTH,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

/// Upper bounds on the live population.
///
/// Clicks are an unbounded producer, so the world refuses spawns that would push it past
/// these limits instead of growing without bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnLimits {
    pub max_fireworks: usize,
    pub max_particles: usize,
}

impl Default for SpawnLimits {
    fn default() -> Self {
        Self {
            max_fireworks: 256,
            max_particles: 8192,
        }
    }
}

/// Where a pointer click places its firework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnAnchor {
    /// Last position reported by a pointer move; the click's own coordinate is ignored.
    #[default]
    Cursor,
    /// The click's coordinate. The cursor is updated to match.
    Click,
}

/// Complete world configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Viewport width in px, fixed at startup
    pub width: f64,
    /// Viewport height in px, fixed at startup
    pub height: f64,
    pub background: Color,
    pub firework: FireworkConfig,
    pub limits: SpawnLimits,
    pub spawn_anchor: SpawnAnchor,
    /// Nominal tick rate for real-time drivers
    pub refresh_rate_hz: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            background: Color::BLACK,
            firework: FireworkConfig::default(),
            limits: SpawnLimits::default(),
            spawn_anchor: SpawnAnchor::default(),
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
        }
    }
}

impl WorldConfig {
    /// Default configuration for a `width` x `height` viewport.
    pub fn with_viewport(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: a non-positive viewport, a negative or
    /// non-finite speed/radius, non-finite gravity, an empty burst, a zero population
    /// limit, a single burst larger than the particle limit, or a bad refresh rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }

        let firework = &self.firework;
        if !non_negative(firework.speed) {
            return Err(ConfigError::InvalidMagnitude {
                name: "speed",
                value: firework.speed,
            });
        }
        if !non_negative(firework.particle_radius) {
            return Err(ConfigError::InvalidMagnitude {
                name: "particle_radius",
                value: firework.particle_radius,
            });
        }
        if !firework.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity {
                x: firework.gravity.x,
                y: firework.gravity.y,
            });
        }
        if firework.amount == 0 {
            return Err(ConfigError::EmptyBurst);
        }

        if self.limits.max_fireworks == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "max_fireworks",
            });
        }
        if self.limits.max_particles == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "max_particles",
            });
        }
        if firework.amount as usize > self.limits.max_particles {
            return Err(ConfigError::BurstExceedsLimit {
                amount: firework.amount,
                max_particles: self.limits.max_particles,
            });
        }

        if !positive(self.refresh_rate_hz) {
            return Err(ConfigError::InvalidRefreshRate(self.refresh_rate_hz));
        }

        Ok(())
    }
}
