//! End-to-end lifecycle tests driving the world the way a frontend would
//!
//! These cover the observable contract: burst geometry, particle/trail lifetimes,
//! culling timing and the per-tick draw stream.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use fireworks_core::{
    Color, CommandBuffer, DrawCommand, Firework, FireworkConfig, PointerEvent, TickCount, Vector2,
    World, WorldConfig,
};
use std::f64::consts::TAU;
use std::num::NonZeroU32;
use std::ops::ControlFlow;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn single_particle_world() -> World {
    let mut config = WorldConfig::with_viewport(400.0, 400.0);
    config.firework = FireworkConfig {
        amount: 1,
        ..FireworkConfig::default()
    };
    World::new(config).unwrap()
}

#[test]
fn test_single_particle_firework_lives_exactly_100_ticks() {
    init_logging();
    let mut world = single_particle_world();
    let mut frame = CommandBuffer::new();

    world.pointer_moved(200.0, 200.0);
    world.pointer_clicked(0.0, 0.0).unwrap();

    for tick in 1..=99 {
        let report = world.tick(&mut frame);
        assert_eq!(report.fireworks, 1, "firework missing after tick {tick}");
    }

    // The 100th advance still draws the particle, then the firework is culled
    let report = world.tick(&mut frame);
    assert!(frame.disc_count() > 0);
    assert_eq!(report.culled_particles, 1);
    assert_eq!(report.culled_fireworks, 1);
    assert_eq!(world.firework_count(), 0);

    // Subsequent frames are just a clear
    world.tick(&mut frame);
    assert_eq!(frame.commands(), &[DrawCommand::Clear { color: Color::BLACK }]);
}

#[test]
fn test_particle_present_iff_younger_than_lifespan() {
    let lifespan = 12;
    let config = FireworkConfig {
        amount: 5,
        particle_lifespan: NonZeroU32::new(lifespan).unwrap(),
        ..FireworkConfig::default()
    };
    let mut firework = Firework::from_config(Vector2::ZERO, &config);
    let mut frame = CommandBuffer::new();

    for _ in 0..lifespan {
        firework.advance(&mut frame);
        for particle in firework.particles() {
            assert!(particle.age() < particle.lifespan().get());
        }
    }

    assert!(firework.is_spent());
}

#[test]
fn test_burst_scenario_four_particles() {
    let firework = Firework::new(Vector2::new(100.0, 100.0), 5.0, 4, Color::RED);
    let expected = [(5.0, 0.0), (0.0, 5.0), (-5.0, 0.0), (0.0, -5.0)];

    assert_eq!(firework.particle_count(), 4);
    for (i, (particle, (vx, vy))) in firework.particles().iter().zip(expected).enumerate() {
        assert_eq!(particle.id() as usize, i);
        assert_abs_diff_eq!(particle.velocity().x, vx, epsilon = 1e-9);
        assert_abs_diff_eq!(particle.velocity().y, vy, epsilon = 1e-9);
    }
}

#[test]
fn test_angular_symmetry_for_many_burst_sizes() {
    for amount in [1_u32, 2, 3, 5, 8, 20, 64] {
        let speed = 2.5;
        let firework = Firework::new(Vector2::new(10.0, -4.0), speed, amount, Color::RED);
        let spacing = TAU / f64::from(amount);

        let mut angles: Vec<f64> = firework
            .particles()
            .iter()
            .map(|p| {
                let v = p.velocity();
                assert_relative_eq!(v.magnitude(), speed, epsilon = 1e-9);
                v.y.atan2(v.x).rem_euclid(TAU)
            })
            .collect();
        angles.sort_by(f64::total_cmp);

        for pair in angles.windows(2) {
            assert_abs_diff_eq!(pair[1] - pair[0], spacing, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_trail_holds_most_recent_segments() {
    let mut world = single_particle_world();
    let mut frame = CommandBuffer::new();
    world.spawn(Vector2::new(50.0, 50.0)).unwrap();

    // A push that fills the trail to its length evicts the oldest segment
    let capacity = world.config().firework.trail_length.get() as usize - 1;
    for tick in 1..=40_usize {
        world.tick(&mut frame);
        let particle = &world.fireworks()[0].particles()[0];
        assert_eq!(particle.trail().len(), tick.min(capacity));

        // Newest segment sits where the head was one tick earlier; ages run oldest first
        let ages: Vec<u32> = particle.trail().iter().map(|s| s.age()).collect();
        let expected: Vec<u32> = (1..=ages.len() as u32).rev().collect();
        assert_eq!(ages, expected);
    }
}

#[test]
fn test_draw_stream_per_tick() {
    let mut world = World::default();
    let mut frame = CommandBuffer::new();
    world.spawn(Vector2::new(640.0, 360.0)).unwrap();
    world.spawn(Vector2::new(100.0, 100.0)).unwrap();

    for _ in 0..15 {
        world.tick(&mut frame);
        let expected_discs: usize = world
            .fireworks()
            .iter()
            .flat_map(Firework::particles)
            .map(|p| 1 + p.trail().len())
            .sum();

        assert_eq!(frame.background(), Some(Color::BLACK));
        assert_eq!(frame.disc_count(), expected_discs);
        assert!(frame
            .discs()
            .all(|(_, radius, color)| radius > 0.0 && color == Color::RED));
    }

    // Two bursts of 20, each particle a head plus nine trail segments
    assert_eq!(frame.disc_count(), 2 * 20 * 10);
}

#[test]
fn test_head_radius_decays_with_age() {
    let mut world = single_particle_world();
    let mut frame = CommandBuffer::new();
    world.spawn(Vector2::ZERO).unwrap();

    for tick in 1..=100_u32 {
        world.tick(&mut frame);
        // The first disc after the clear is the particle head
        let (_, radius, _) = frame.discs().next().unwrap();
        assert_relative_eq!(radius, 5.0 * (1.0 - f64::from(tick) / 100.0), epsilon = 1e-12);
    }
}

#[test]
fn test_particles_fall_under_gravity() {
    let mut world = single_particle_world();
    let mut frame = CommandBuffer::new();
    world.spawn(Vector2::new(0.0, 0.0)).unwrap();

    for _ in 0..10 {
        world.tick(&mut frame);
    }

    let particle = &world.fireworks()[0].particles()[0];
    // v_y after n ticks is 0.1 n; y is the sum 0.1 * (1 + ... + n)
    assert_relative_eq!(particle.velocity().y, 1.0, epsilon = 1e-9);
    assert_relative_eq!(particle.position().y, 5.5, epsilon = 1e-9);
    assert_relative_eq!(particle.position().x, 50.0, epsilon = 1e-9);
}

#[test]
fn test_run_with_scripted_clicks() {
    init_logging();
    let mut world = World::default();
    let mut frame = CommandBuffer::new();
    let mut source = TickCount::new(250);
    let mut peak = 0_usize;

    let executed = world.run(&mut source, &mut frame, |world, report| {
        peak = peak.max(report.fireworks);
        if report.tick % 10 == 0 && report.tick <= 100 {
            let x = report.tick as f64;
            world
                .handle_event(PointerEvent::Move { x, y: 300.0 })
                .unwrap();
            world
                .handle_event(PointerEvent::Click { x, y: 300.0 })
                .unwrap();
        }
        ControlFlow::Continue(())
    });

    assert_eq!(executed, 250);
    assert_eq!(peak, 10);
    // Last click lands after tick 100 and burns out 100 ticks later
    assert_eq!(world.firework_count(), 0);
}
