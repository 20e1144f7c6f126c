//! The fireworks world and its per-frame drive step
//!
//! `World` owns every live [`Firework`] plus the pointer cursor. A driver feeds it pointer
//! events between ticks and calls [`World::tick`] once per display refresh (directly, or
//! through [`World::run`] with a [`TickSource`]). Each tick:
//!
//! 1. clears the surface to the background color,
//! 2. advances every firework (which advances and draws every particle and its trail),
//! 3. drops fireworks that have no particles left.
//!
//! All state is owned as a plain tree (world → fireworks → particles → smoke), and removal
//! is always by `retain`, so a single driving task can own the world outright.

pub mod clock;
pub mod config;
pub mod input;

pub use clock::{FixedRate, TickCount, TickSource};
pub use config::{FireworkConfig, SpawnAnchor, SpawnLimits, WorldConfig};
pub use input::PointerEvent;

use crate::core_types::Vector2;
use crate::effects::Firework;
use crate::error::{ConfigError, SpawnError};
use crate::render::Surface;
use std::ops::ControlFlow;
use tracing::{debug, info, trace, warn};

/// Summary of one completed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// 1-based number of the tick just completed
    pub tick: u64,
    /// Fireworks still live after culling
    pub fireworks: usize,
    /// Particles still live after culling
    pub particles: usize,
    pub culled_particles: usize,
    pub culled_fireworks: usize,
}

/// Process-wide simulation state for one session.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    fireworks: Vec<Firework>,
    cursor: Vector2,
    ticks: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::from_valid(WorldConfig::default())
    }
}

impl World {
    /// Create an empty world with the cursor at the origin.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`WorldConfig::validate`].
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: WorldConfig) -> Self {
        info!(
            "Creating fireworks world: {}x{} viewport, {} particles/burst, limits {} fireworks / {} particles",
            config.width,
            config.height,
            config.firework.amount,
            config.limits.max_fireworks,
            config.limits.max_particles
        );

        Self {
            fireworks: Vec::with_capacity(config.limits.max_fireworks.min(64)),
            config,
            cursor: Vector2::ZERO,
            ticks: 0,
        }
    }

    /// Apply one pointer event.
    ///
    /// # Errors
    ///
    /// A click returns a [`SpawnError`] when a population limit refuses the new firework.
    /// Moves never fail.
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<(), SpawnError> {
        match event {
            PointerEvent::Move { x, y } => {
                self.pointer_moved(x, y);
                Ok(())
            }
            PointerEvent::Click { x, y } => self.pointer_clicked(x, y),
        }
    }

    /// Move the cursor. Takes effect immediately.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.cursor = Vector2::new(x, y);
    }

    /// Spawn the configured firework in response to a click.
    ///
    /// With [`SpawnAnchor::Cursor`] (the default) the firework appears at the last cursor
    /// position and `(x, y)` is ignored; with [`SpawnAnchor::Click`] it appears at
    /// `(x, y)` and the cursor follows.
    ///
    /// # Errors
    ///
    /// Returns a [`SpawnError`] when the firework or particle limit would be exceeded.
    pub fn pointer_clicked(&mut self, x: f64, y: f64) -> Result<(), SpawnError> {
        if self.config.spawn_anchor == SpawnAnchor::Click {
            self.pointer_moved(x, y);
        }
        self.spawn(self.cursor)
    }

    /// Spawn the configured firework at `position`.
    ///
    /// # Errors
    ///
    /// Returns a [`SpawnError`] when the firework or particle limit would be exceeded.
    pub fn spawn(&mut self, position: Vector2) -> Result<(), SpawnError> {
        self.check_limits(self.config.firework.amount as usize)?;
        let firework = Firework::from_config(position, &self.config.firework);
        self.push_firework(firework);
        Ok(())
    }

    /// Add an arbitrary firework, subject to the same limits as a click.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::EmptyFirework`] for a firework that is already spent, or a
    /// limit error when the firework or particle limit would be exceeded.
    pub fn spawn_firework(&mut self, firework: Firework) -> Result<(), SpawnError> {
        if firework.is_spent() {
            debug!("Ignoring spent firework at {:?}", firework.position());
            return Err(SpawnError::EmptyFirework);
        }
        self.check_limits(firework.particle_count())?;
        self.push_firework(firework);
        Ok(())
    }

    fn check_limits(&self, requested: usize) -> Result<(), SpawnError> {
        let limits = self.config.limits;

        let result = if self.fireworks.len() >= limits.max_fireworks {
            Err(SpawnError::FireworkLimit {
                limit: limits.max_fireworks,
            })
        } else {
            let active = self.particle_count();
            if active + requested > limits.max_particles {
                Err(SpawnError::ParticleLimit {
                    limit: limits.max_particles,
                    active,
                    requested,
                })
            } else {
                Ok(())
            }
        };

        if let Err(err) = &result {
            warn!("Spawn rejected: {err}");
        }
        result
    }

    fn push_firework(&mut self, firework: Firework) {
        let position = firework.position();
        debug!(
            "Spawning firework at ({:.1}, {:.1}) with {} particles",
            position.x,
            position.y,
            firework.particle_count()
        );
        self.fireworks.push(firework);
    }

    /// Remove every live firework.
    pub fn clear(&mut self) {
        debug!("Clearing {} fireworks", self.fireworks.len());
        self.fireworks.clear();
    }

    /// Run one frame: clear, advance and draw everything, cull.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TickReport {
        self.ticks += 1;
        surface.clear(self.config.background);

        let mut culled_particles = 0;
        for firework in &mut self.fireworks {
            culled_particles += firework.advance(surface);
        }

        let before = self.fireworks.len();
        self.fireworks.retain(|firework| !firework.is_spent());
        let culled_fireworks = before - self.fireworks.len();

        let report = TickReport {
            tick: self.ticks,
            fireworks: self.fireworks.len(),
            particles: self.particle_count(),
            culled_particles,
            culled_fireworks,
        };

        if culled_fireworks > 0 {
            debug!(
                "Tick {}: {} fireworks burned out, {} remain",
                report.tick, culled_fireworks, report.fireworks
            );
        } else {
            trace!(
                "Tick {}: {} fireworks, {} particles",
                report.tick,
                report.fireworks,
                report.particles
            );
        }

        report
    }

    /// Drive the world from `source` until it is exhausted or `on_frame` breaks.
    ///
    /// `on_frame` runs after every tick with the tick's report; it is the place to feed
    /// pointer events for the next frame or present the surface. Returns the number of
    /// ticks executed.
    pub fn run<T, S, F>(&mut self, source: &mut T, surface: &mut S, mut on_frame: F) -> u64
    where
        T: TickSource + ?Sized,
        S: Surface + ?Sized,
        F: FnMut(&mut Self, &TickReport) -> ControlFlow<()>,
    {
        let mut executed = 0;
        while source.next_tick() {
            let report = self.tick(surface);
            executed += 1;
            if on_frame(self, &report).is_break() {
                break;
            }
        }
        executed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn cursor(&self) -> Vector2 {
        self.cursor
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn firework_count(&self) -> usize {
        self.fireworks.len()
    }

    pub fn particle_count(&self) -> usize {
        self.fireworks.iter().map(Firework::particle_count).sum()
    }

    pub fn smoke_count(&self) -> usize {
        self.fireworks.iter().map(Firework::smoke_count).sum()
    }

    /// Ticks completed since the world was created.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Color;
    use crate::render::{CommandBuffer, DrawCommand};

    fn small_world() -> World {
        let mut config = WorldConfig::with_viewport(200.0, 200.0);
        config.firework.amount = 4;
        World::new(config).unwrap()
    }

    #[test]
    fn test_new_world_is_empty() {
        let world = World::default();
        assert_eq!(world.cursor(), Vector2::ZERO);
        assert_eq!(world.firework_count(), 0);
        assert_eq!(world.ticks(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WorldConfig::with_viewport(-1.0, 10.0);
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_click_spawns_at_cursor_not_click_position() {
        let mut world = small_world();
        world
            .handle_event(PointerEvent::Move { x: 40.0, y: 60.0 })
            .unwrap();
        world
            .handle_event(PointerEvent::Click { x: 1.0, y: 2.0 })
            .unwrap();

        assert_eq!(world.firework_count(), 1);
        assert_eq!(world.fireworks()[0].position(), Vector2::new(40.0, 60.0));
        assert_eq!(world.cursor(), Vector2::new(40.0, 60.0));
    }

    #[test]
    fn test_click_anchor_uses_click_position() {
        let config = WorldConfig {
            spawn_anchor: SpawnAnchor::Click,
            ..WorldConfig::default()
        };
        let mut world = World::new(config).unwrap();

        world.pointer_clicked(12.0, 34.0).unwrap();

        assert_eq!(world.fireworks()[0].position(), Vector2::new(12.0, 34.0));
        assert_eq!(world.cursor(), Vector2::new(12.0, 34.0));
    }

    #[test]
    fn test_click_uses_configured_firework() {
        let mut world = World::default();
        world.pointer_clicked(0.0, 0.0).unwrap();

        let firework = &world.fireworks()[0];
        assert_eq!(firework.speed(), 5.0);
        assert_eq!(firework.amount(), 20);
        assert_eq!(firework.color(), Color::RED);
    }

    #[test]
    fn test_tick_clears_then_draws() {
        let mut world = small_world();
        world.spawn(Vector2::new(100.0, 100.0)).unwrap();
        let mut frame = CommandBuffer::new();

        let report = world.tick(&mut frame);

        assert_eq!(
            frame.commands()[0],
            DrawCommand::Clear {
                color: Color::BLACK
            }
        );
        let clears = frame
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Clear { .. }))
            .count();
        assert_eq!(clears, 1);
        // 4 heads, each with a one-segment trail
        assert_eq!(frame.disc_count(), 4 * 2);
        assert_eq!(
            report,
            TickReport {
                tick: 1,
                fireworks: 1,
                particles: 4,
                culled_particles: 0,
                culled_fireworks: 0,
            }
        );
    }

    #[test]
    fn test_empty_world_still_clears() {
        let mut world = World::default();
        let mut frame = CommandBuffer::new();
        world.tick(&mut frame);
        assert_eq!(frame.commands().len(), 1);
        assert_eq!(frame.background(), Some(Color::BLACK));
    }

    #[test]
    fn test_firework_limit() {
        let mut config = WorldConfig::default();
        config.limits.max_fireworks = 2;
        let mut world = World::new(config).unwrap();

        world.spawn(Vector2::ZERO).unwrap();
        world.spawn(Vector2::ZERO).unwrap();
        assert_eq!(
            world.spawn(Vector2::ZERO),
            Err(SpawnError::FireworkLimit { limit: 2 })
        );
        assert_eq!(world.firework_count(), 2);
    }

    #[test]
    fn test_particle_limit() {
        let mut config = WorldConfig::default();
        config.limits.max_particles = 50;
        let mut world = World::new(config).unwrap();

        world.spawn(Vector2::ZERO).unwrap();
        world.spawn(Vector2::ZERO).unwrap();
        assert_eq!(
            world.pointer_clicked(0.0, 0.0),
            Err(SpawnError::ParticleLimit {
                limit: 50,
                active: 40,
                requested: 20,
            })
        );

        // A smaller custom firework still fits
        world
            .spawn_firework(Firework::new(Vector2::ZERO, 5.0, 10, Color::RED))
            .unwrap();
        assert_eq!(world.particle_count(), 50);
    }

    #[test]
    fn test_spent_firework_is_rejected() {
        let mut config = WorldConfig::default();
        config.limits.max_fireworks = 1;
        let mut world = World::new(config).unwrap();

        assert_eq!(
            world.spawn_firework(Firework::new(Vector2::ZERO, 5.0, 0, Color::RED)),
            Err(SpawnError::EmptyFirework)
        );
        assert_eq!(world.firework_count(), 0);

        // The only slot is still free for a real burst
        world.spawn(Vector2::ZERO).unwrap();
        assert_eq!(world.firework_count(), 1);
    }

    #[test]
    fn test_limits_free_up_after_culling() {
        let mut config = WorldConfig::default();
        config.limits.max_fireworks = 1;
        config.firework.particle_lifespan = std::num::NonZeroU32::new(2).unwrap();
        let mut world = World::new(config).unwrap();
        let mut frame = CommandBuffer::new();

        world.spawn(Vector2::ZERO).unwrap();
        assert!(world.spawn(Vector2::ZERO).is_err());

        world.tick(&mut frame);
        let report = world.tick(&mut frame);
        assert_eq!(report.culled_fireworks, 1);
        assert_eq!(report.culled_particles, 20);

        assert!(world.spawn(Vector2::ZERO).is_ok());
    }

    #[test]
    fn test_clear() {
        let mut world = small_world();
        world.spawn(Vector2::ZERO).unwrap();
        world.spawn(Vector2::ZERO).unwrap();
        world.clear();
        assert_eq!(world.firework_count(), 0);
        assert_eq!(world.particle_count(), 0);
    }

    #[test]
    fn test_run_stops_when_source_exhausted() {
        let mut world = small_world();
        let mut frame = CommandBuffer::new();
        let mut source = TickCount::new(5);

        let executed = world.run(&mut source, &mut frame, |_, _| ControlFlow::Continue(()));

        assert_eq!(executed, 5);
        assert_eq!(world.ticks(), 5);
    }

    #[test]
    fn test_run_stops_on_break() {
        let mut world = small_world();
        let mut frame = CommandBuffer::new();
        let mut source = TickCount::new(100);

        let executed = world.run(&mut source, &mut frame, |world, report| {
            if report.tick == 1 {
                world.spawn(Vector2::new(50.0, 50.0)).unwrap();
            }
            if report.tick == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(executed, 3);
        assert_eq!(source.remaining(), 97);
        // Spawned after tick 1, advanced on ticks 2 and 3
        assert_eq!(world.fireworks()[0].particles()[0].age(), 2);
    }
}
