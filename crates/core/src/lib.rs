//! Fireworks Simulation Core Library
//!
//! A real-time 2D particle simulation: a pointer click spawns a radial firework burst
//! whose particles age, fall under gravity and leave a fading smoke trail.
//!
//! The library is frontend-agnostic. A driver owns a [`World`], forwards pointer events to
//! it and calls [`World::tick`] once per display refresh against any [`Surface`]. Each
//! tick produces one background clear followed by filled-disc draw commands.
//!
//! ```
//! use fireworks_core::{CommandBuffer, PointerEvent, World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::with_viewport(800.0, 600.0)).unwrap();
//! world.handle_event(PointerEvent::Move { x: 400.0, y: 300.0 }).unwrap();
//! world.handle_event(PointerEvent::Click { x: 400.0, y: 300.0 }).unwrap();
//!
//! let mut frame = CommandBuffer::new();
//! let report = world.tick(&mut frame);
//! assert_eq!(report.particles, 20);
//! ```

// Core value types
pub mod core_types;
pub mod error;

// Simulated entities and the world that drives them
pub mod effects;
pub mod render;
pub mod simulation;

pub use core_types::{Color, Vector2};
pub use effects::{Firework, Particle, Smoke};
pub use error::{ColorParseError, ConfigError, SpawnError};
pub use render::{faded_radius, CommandBuffer, DrawCommand, Surface};
pub use simulation::{
    FireworkConfig, FixedRate, PointerEvent, SpawnAnchor, SpawnLimits, TickCount, TickReport,
    TickSource, World, WorldConfig,
};
