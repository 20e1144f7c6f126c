//! Error types for configuration, spawning and color parsing.

use thiserror::Error;

/// Rejected [`WorldConfig`](crate::WorldConfig) or tick-rate parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidMagnitude { name: &'static str, value: f64 },

    #[error("gravity must be finite, got ({x}, {y})")]
    InvalidGravity { x: f64, y: f64 },

    #[error("burst amount must be at least 1")]
    EmptyBurst,

    #[error("{name} must be at least 1")]
    ZeroLimit { name: &'static str },

    #[error("a single burst of {amount} particles exceeds the particle limit of {max_particles}")]
    BurstExceedsLimit { amount: u32, max_particles: usize },

    #[error("refresh rate must be finite and positive, got {0} Hz")]
    InvalidRefreshRate(f64),
}

/// A firework that could not be added to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("firework has no live particles")]
    EmptyFirework,

    #[error("firework limit reached ({limit} active)")]
    FireworkLimit { limit: usize },

    #[error("particle limit reached: {active} active + {requested} requested > {limit}")]
    ParticleLimit {
        limit: usize,
        active: usize,
        requested: usize,
    },
}

/// A color string that is neither a known name, `rgb(r, g, b)` nor hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("unknown color name '{0}'")]
    UnknownName(String),

    #[error("malformed color '{0}'")]
    Malformed(String),
}
