//! Headless fireworks demo
//!
//! Runs the simulation without a display: pointer input is scripted (seeded random
//! positions, one click every `--click-interval` ticks) and draw calls are only counted.
//! Prints periodic population reports and a final summary.
//!
//! ```bash
//! cargo run --package demo-headless -- --ticks 600 --clicks 20 --seed 7
//! RUST_LOG=fireworks_core=debug cargo run --package demo-headless -- --realtime
//! ```

use clap::Parser;
use fireworks_core::simulation::config::{DEFAULT_PARTICLE_LIFESPAN, DEFAULT_TRAIL_LENGTH};
use fireworks_core::{
    Color, FireworkConfig, FixedRate, PointerEvent, SpawnAnchor, SpawnLimits, Surface, TickCount,
    TickSource, Vector2, World, WorldConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::num::NonZeroU32;
use std::ops::ControlFlow;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fireworks simulation demo with scripted pointer input
#[derive(Parser, Debug)]
#[command(name = "fireworks-demo")]
#[command(about = "Headless fireworks particle simulation", long_about = None)]
struct Args {
    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Total number of clicks to script
    #[arg(short, long, default_value_t = 20)]
    clicks: u32,

    /// Ticks between scripted clicks
    #[arg(long, default_value_t = 15)]
    click_interval: u64,

    /// Seed for pointer positions
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Viewport width in px
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in px
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Initial particle speed (px/tick)
    #[arg(long, default_value_t = 5.0)]
    speed: f64,

    /// Particles per burst
    #[arg(short, long, default_value_t = 20)]
    amount: u32,

    /// Particle color (name, rgb(r, g, b) or #rrggbb)
    #[arg(long, default_value = "red")]
    color: Color,

    /// Background color
    #[arg(long, default_value = "black")]
    background: Color,

    /// Particle lifespan in ticks
    #[arg(long, default_value_t = DEFAULT_PARTICLE_LIFESPAN)]
    lifespan: NonZeroU32,

    /// Trail length in segments
    #[arg(long, default_value_t = DEFAULT_TRAIL_LENGTH)]
    trail_length: NonZeroU32,

    /// Downward acceleration (px/tick²)
    #[arg(long, default_value_t = 0.1)]
    gravity: f64,

    /// Maximum concurrent fireworks
    #[arg(long, default_value_t = 256)]
    max_fireworks: usize,

    /// Maximum concurrent particles
    #[arg(long, default_value_t = 8192)]
    max_particles: usize,

    /// Spawn at the click position instead of the last cursor position
    #[arg(long)]
    spawn_at_click: bool,

    /// Pace ticks at the refresh rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Refresh rate for --realtime (Hz)
    #[arg(long, default_value_t = 60.0)]
    refresh_rate: f64,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 60)]
    report_interval: u64,
}

impl Args {
    fn world_config(&self) -> WorldConfig {
        WorldConfig {
            width: self.width,
            height: self.height,
            background: self.background,
            firework: FireworkConfig {
                speed: self.speed,
                amount: self.amount,
                color: self.color,
                particle_lifespan: self.lifespan,
                trail_length: self.trail_length,
                gravity: Vector2::new(0.0, self.gravity),
                ..FireworkConfig::default()
            },
            limits: SpawnLimits {
                max_fireworks: self.max_fireworks,
                max_particles: self.max_particles,
            },
            spawn_anchor: if self.spawn_at_click {
                SpawnAnchor::Click
            } else {
                SpawnAnchor::Cursor
            },
            refresh_rate_hz: self.refresh_rate,
        }
    }
}

/// Running totals collected from tick reports
#[derive(Debug, Default)]
struct Totals {
    clicks: u32,
    spawned: u32,
    rejected: u32,
    peak_fireworks: usize,
    peak_particles: usize,
    culled_particles: usize,
    culled_fireworks: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Fireworks Simulation Demo ===\n");

    let config = args.world_config();
    let mut world = World::new(config)?;
    println!(
        "Viewport {:.0}x{:.0}, {} particles/burst at speed {:.1}, lifespan {} ticks, trail {}",
        args.width, args.height, args.amount, args.speed, args.lifespan, args.trail_length
    );
    println!(
        "Limits: {} fireworks, {} particles\n",
        args.max_fireworks, args.max_particles
    );

    let mut source: Box<dyn TickSource> = if args.realtime {
        println!("Pacing at {:.0} Hz for {} ticks", args.refresh_rate, args.ticks);
        Box::new(PacedTicks {
            clock: FixedRate::from_hz(args.refresh_rate)?,
            remaining: TickCount::new(args.ticks),
        })
    } else {
        Box::new(TickCount::new(args.ticks))
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut frame = DrawStats::default();
    let mut totals = Totals::default();
    let start = Instant::now();

    // The first click lands before tick 1 so short runs still show a burst
    script_click(&mut world, &mut rng, &args, &mut totals);

    let executed = world.run(source.as_mut(), &mut frame, |world, report| {
        totals.peak_fireworks = totals.peak_fireworks.max(report.fireworks);
        totals.peak_particles = totals.peak_particles.max(report.particles);
        totals.culled_particles += report.culled_particles;
        totals.culled_fireworks += report.culled_fireworks;

        if args.report_interval > 0 && report.tick % args.report_interval == 0 {
            println!(
                "[tick {:>5}] fireworks: {:>3}  particles: {:>5}  smoke: {:>6}",
                report.tick,
                report.fireworks,
                report.particles,
                world.smoke_count()
            );
        }

        if args.click_interval > 0 && report.tick % args.click_interval == 0 {
            script_click(world, &mut rng, &args, &mut totals);
        }

        ControlFlow::Continue(())
    });

    let elapsed = start.elapsed();
    info!("Simulation finished after {} ticks", executed);

    println!("\n=== Summary ===");
    println!("Ticks:            {}", executed);
    println!(
        "Clicks:           {} ({} spawned, {} rejected by limits)",
        totals.clicks, totals.spawned, totals.rejected
    );
    println!("Peak fireworks:   {}", totals.peak_fireworks);
    println!("Peak particles:   {}", totals.peak_particles);
    println!("Culled particles: {}", totals.culled_particles);
    println!("Culled fireworks: {}", totals.culled_fireworks);
    println!("Still live:       {} fireworks", world.firework_count());
    println!(
        "Draw calls:       {} discs over {} frames ({} fully faded)",
        frame.discs, frame.frames, frame.invisible
    );
    println!("Last frame:       {} discs", frame.last_frame_discs);
    println!(
        "Wall time:        {:.2?} ({:.1} ticks/s)",
        elapsed,
        executed as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    Ok(())
}

/// Surface that only counts what would have been drawn
#[derive(Debug, Default)]
struct DrawStats {
    frames: u64,
    discs: u64,
    invisible: u64,
    last_frame_discs: u64,
}

impl Surface for DrawStats {
    fn clear(&mut self, _color: Color) {
        self.frames += 1;
        self.last_frame_discs = 0;
    }

    fn fill_disc(&mut self, _center: Vector2, radius: f64, _color: Color) {
        self.discs += 1;
        self.last_frame_discs += 1;
        if radius == 0.0 {
            self.invisible += 1;
        }
    }
}

fn script_click(world: &mut World, rng: &mut StdRng, args: &Args, totals: &mut Totals) {
    if totals.clicks >= args.clicks {
        return;
    }
    totals.clicks += 1;

    let x = rng.random_range(0.0..args.width);
    let y = rng.random_range(0.0..args.height);
    world.pointer_moved(x, y);

    match world.handle_event(PointerEvent::Click { x, y }) {
        Ok(()) => totals.spawned += 1,
        Err(err) => {
            totals.rejected += 1;
            println!("Click {} at ({:.0}, {:.0}) rejected: {}", totals.clicks, x, y, err);
        }
    }
}

/// `FixedRate` pacing bounded to a tick budget
struct PacedTicks {
    clock: FixedRate,
    remaining: TickCount,
}

impl TickSource for PacedTicks {
    fn next_tick(&mut self) -> bool {
        self.remaining.next_tick() && self.clock.next_tick()
    }
}
