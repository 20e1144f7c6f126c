//! Static trail segments left behind by moving particles.

use crate::core_types::{Color, Vector2};
use crate::render::{faded_radius, Surface};
use std::num::NonZeroU32;

/// One fading trail decal.
///
/// Smoke never moves. It only ages, shrinking from `base_radius` to zero over
/// `lifespan` ticks. Its owning [`Particle`](super::Particle) decides when it is
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Smoke {
    pub(crate) position: Vector2,
    pub(crate) base_radius: f64,
    pub(crate) color: Color,
    pub(crate) lifespan: NonZeroU32,
    pub(crate) age: u32,
}

impl Smoke {
    pub fn new(position: Vector2, base_radius: f64, color: Color, lifespan: NonZeroU32) -> Self {
        Self {
            position,
            base_radius,
            color,
            lifespan,
            age: 0,
        }
    }

    /// Age by one tick and draw.
    pub fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.age = self.age.saturating_add(1);
        surface.fill_disc(self.position, self.radius(), self.color);
    }

    /// Radius as currently rendered.
    pub fn radius(&self) -> f64 {
        faded_radius(self.base_radius, self.age, self.lifespan)
    }

    pub fn position(&self) -> Vector2 {
        self.position
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
}
