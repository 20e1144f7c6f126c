//! Point-mass particles with a bounded smoke trail.

use super::smoke::Smoke;
use crate::core_types::{Color, Vector2};
use crate::render::{faded_radius, Surface};
use std::collections::VecDeque;
use std::num::NonZeroU32;

/// A single firework spark.
///
/// Integrates with semi-implicit Euler at one unit of time per tick and drops a
/// [`Smoke`] snapshot of itself every tick. The trail is a FIFO holding at most
/// `trail_length - 1` segments: once a push fills it to `trail_length` the oldest is
/// evicted, so a segment is gone before it fades out completely.
///
/// # Example
///
/// ```
/// use fireworks_core::{Color, CommandBuffer, Particle, Vector2};
/// use std::num::NonZeroU32;
///
/// let mut particle = Particle::new(
///     0,
///     Vector2::new(10.0, 10.0),
///     5.0,
///     Color::RED,
///     NonZeroU32::new(100).unwrap(),
///     NonZeroU32::new(10).unwrap(),
/// )
/// .with_velocity(Vector2::new(1.0, 0.0));
///
/// let mut frame = CommandBuffer::new();
/// particle.advance(Vector2::new(0.0, 0.1), &mut frame);
///
/// assert_eq!(particle.position(), Vector2::new(11.0, 10.1));
/// assert_eq!(particle.trail().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub(crate) id: u32,
    pub(crate) position: Vector2,
    pub(crate) velocity: Vector2,
    pub(crate) acceleration: Vector2,
    pub(crate) base_radius: f64,
    pub(crate) color: Color,
    pub(crate) lifespan: NonZeroU32,
    pub(crate) age: u32,
    trail_length: NonZeroU32,
    trail: VecDeque<Smoke>,
}

impl Particle {
    /// Create a particle at rest.
    pub fn new(
        id: u32,
        position: Vector2,
        base_radius: f64,
        color: Color,
        lifespan: NonZeroU32,
        trail_length: NonZeroU32,
    ) -> Self {
        Self {
            id,
            position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            base_radius,
            color,
            lifespan,
            age: 0,
            trail_length,
            trail: VecDeque::with_capacity(trail_length.get() as usize),
        }
    }

    /// Replace the initial velocity.
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Advance one tick under `acceleration`, drawing the particle and then its trail.
    pub fn advance<S: Surface + ?Sized>(&mut self, acceleration: Vector2, surface: &mut S) {
        self.age = self.age.saturating_add(1);

        // Snapshot is taken before moving, so the trail lags one tick behind the head
        self.trail.push_back(Smoke::new(
            self.position,
            self.radius(),
            self.color,
            self.trail_length,
        ));
        if self.trail.len() >= self.trail_length.get() as usize {
            self.trail.pop_front();
        }

        self.acceleration = acceleration;
        self.velocity += self.acceleration;
        self.position += self.velocity;

        surface.fill_disc(self.position, self.radius(), self.color);
        for smoke in &mut self.trail {
            smoke.advance(surface);
        }
    }

    /// Radius as currently rendered; zero once the particle has outlived its lifespan.
    pub fn radius(&self) -> f64 {
        faded_radius(self.base_radius, self.age, self.lifespan)
    }

    /// True while `age < lifespan`.
    pub fn is_alive(&self) -> bool {
        self.age < self.lifespan.get()
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn lifespan(&self) -> NonZeroU32 {
        self.lifespan
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn trail_length(&self) -> NonZeroU32 {
        self.trail_length
    }

    /// Trail segments, oldest first.
    pub fn trail(&self) -> &VecDeque<Smoke> {
        &self.trail
    }
}
