//! Drawing surface abstraction
//!
//! The simulation never talks to a window or terminal directly. Each tick it issues one
//! background clear followed by a stream of filled-disc commands against a [`Surface`].
//! Frontends implement `Surface` (or replay a [`CommandBuffer`]) to put pixels on screen;
//! tests use `CommandBuffer` to inspect exactly what was drawn.

use crate::core_types::{Color, Vector2};
use std::num::NonZeroU32;

/// Target for per-tick draw commands.
pub trait Surface {
    /// Wipe the whole frame with `color`.
    fn clear(&mut self, color: Color);

    /// Draw a filled disc. `radius` is always finite and non-negative.
    fn fill_disc(&mut self, center: Vector2, radius: f64, color: Color);
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Disc {
        center: Vector2,
        radius: f64,
        color: Color,
    },
}

/// [`Surface`] that records commands instead of drawing them.
///
/// A `clear` drops everything recorded before it, so after a tick the buffer holds exactly
/// one frame: the clear followed by that frame's discs.
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last clear (inclusive).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterate over the recorded discs as `(center, radius, color)`.
    pub fn discs(&self) -> impl Iterator<Item = (Vector2, f64, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match *cmd {
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => Some((center, radius, color)),
            DrawCommand::Clear { .. } => None,
        })
    }

    pub fn disc_count(&self) -> usize {
        self.discs().count()
    }

    /// Background color of the current frame, if it has been cleared.
    pub fn background(&self) -> Option<Color> {
        match self.commands.first() {
            Some(DrawCommand::Clear { color }) => Some(*color),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_disc(&mut self, center: Vector2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }
}

/// Radius of something that shrinks linearly to nothing over its lifespan.
///
/// `base * (1 - age / lifespan)`, clamped to zero once `age` passes `lifespan`. A
/// non-finite result (e.g. from a NaN base radius) also collapses to zero so the entity
/// just becomes invisible.
#[inline]
pub fn faded_radius(base_radius: f64, age: u32, lifespan: NonZeroU32) -> f64 {
    let remaining = 1.0 - f64::from(age) / f64::from(lifespan.get());
    let radius = base_radius * remaining;
    if radius.is_finite() {
        radius.max(0.0)
    } else {
        0.0
    }
}
