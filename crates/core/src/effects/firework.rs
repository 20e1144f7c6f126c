//! Radial particle bursts.

use super::particle::Particle;
use crate::core_types::{Color, Vector2};
use crate::render::Surface;
use crate::simulation::config::FireworkConfig;
use std::f64::consts::TAU;

/// A burst of particles fired evenly around a circle.
///
/// Particle `i` of `amount` leaves at angle `i * 2π / amount` with speed `speed`. The
/// firework owns its particles and drops each one once it has lived out its lifespan; it
/// is spent once none are left.
///
/// # Example
///
/// ```
/// use fireworks_core::{Color, CommandBuffer, Firework, Vector2};
///
/// let mut firework = Firework::new(Vector2::new(100.0, 100.0), 5.0, 4, Color::RED);
/// assert_eq!(firework.particle_count(), 4);
///
/// let mut frame = CommandBuffer::new();
/// for _ in 0..100 {
///     firework.advance(&mut frame);
/// }
/// assert!(firework.is_spent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Firework {
    pub(crate) position: Vector2,
    pub(crate) speed: f64,
    pub(crate) amount: u32,
    pub(crate) color: Color,
    pub(crate) gravity: Vector2,
    particles: Vec<Particle>,
}

impl Firework {
    /// Burst with the stock particle parameters (radius 5, lifespan 100, trail of 10,
    /// gravity `(0, 0.1)`).
    pub fn new(position: Vector2, speed: f64, amount: u32, color: Color) -> Self {
        Self::from_config(
            position,
            &FireworkConfig {
                speed,
                amount,
                color,
                ..FireworkConfig::default()
            },
        )
    }

    /// Burst at `position` using every parameter from `config`.
    pub fn from_config(position: Vector2, config: &FireworkConfig) -> Self {
        let step = if config.amount == 0 {
            0.0
        } else {
            TAU / f64::from(config.amount)
        };

        let particles = (0..config.amount)
            .map(|i| {
                let velocity = Vector2::from_angle(f64::from(i) * step) * config.speed;
                Particle::new(
                    i,
                    position,
                    config.particle_radius,
                    config.color,
                    config.particle_lifespan,
                    config.trail_length,
                )
                .with_velocity(velocity)
            })
            .collect();

        Self {
            position,
            speed: config.speed,
            amount: config.amount,
            color: config.color,
            gravity: config.gravity,
            particles,
        }
    }

    /// Advance and draw every particle, then drop the ones that have expired.
    ///
    /// Returns the number of particles removed this tick. Expired particles still draw
    /// on the tick they expire.
    pub fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        for particle in &mut self.particles {
            particle.advance(self.gravity, surface);
        }

        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);
        before - self.particles.len()
    }

    /// True once every particle has been culled.
    pub fn is_spent(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Segments currently held across all particle trails.
    pub fn smoke_count(&self) -> usize {
        self.particles.iter().map(|p| p.trail().len()).sum()
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }
}
