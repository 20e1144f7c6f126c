//! Simulated entities: fireworks own particles, particles own their smoke trails.

pub mod firework;
pub mod particle;
pub mod smoke;

pub use firework::Firework;
pub use particle::Particle;
pub use smoke::Smoke;
