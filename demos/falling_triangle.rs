//! Drops a triangle onto a small scene, steers it from the simulation thread and samples
//! interpolated frames from the main thread at roughly 60 fps.
//!
//! Run with `cargo run --example falling_triangle`; set `RUST_LOG=polyslide=trace` for per-tick logs.

#[macro_use]
extern crate tracing;

use polyslide::{
    render::{extract, DrawBatch},
    BodyCommand, BodyId, Camera, Color, DynamicBody, FixedStepScheduler, PhysicsWorld, Polygon,
    StaticBody, Vector2, Viewport,
};
use std::{env, thread, time::{Duration, Instant}};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Our crate is debug, everything else is warn.
const DEFAULT_FILTER: &str = "warn,polyslide=debug,falling_triangle=debug";

const PUSH: f32 = 1500.0;
const PLAYER: BodyId = BodyId(0);

fn init_logging() {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(fmt::layer().compact().with_line_number(true));
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a log subscriber was already installed");
    }
}

fn build_scene() -> polyslide::Result<PhysicsWorld> {
    let mut world = PhysicsWorld::new();

    world.insert_static(
        BodyId(0),
        StaticBody::new(
            Polygon::new(vec![
                Vector2::new(-75.0, 150.0),
                Vector2::new(75.0, 0.0),
                Vector2::new(-75.0, -150.0),
            ])?,
            Vector2::new(-200.0, 0.0),
        )?
        .with_color(Color::rgb(0xA0, 0xA0, 0xBA)),
    )?;
    world.insert_static(
        BodyId(1),
        StaticBody::new(
            Polygon::new(vec![
                Vector2::new(-250.0, 0.0),
                Vector2::new(50.0, 0.0),
                Vector2::new(150.0, 40.0),
                Vector2::new(200.0, 150.0),
                Vector2::new(200.0, -150.0),
            ])?,
            Vector2::new(140.0, 0.0),
        )?
        .with_color(Color::rgb(0x50, 0x50, 0x5A)),
    )?;
    world.insert_static(
        BodyId(2),
        StaticBody::new(
            Polygon::new(vec![
                Vector2::new(-25.0, -20.0),
                Vector2::new(0.0, 20.0),
                Vector2::new(25.0, -20.0),
            ])?,
            Vector2::new(0.0, -100.0),
        )?
        .with_color(Color::rgb(255, 160, 100)),
    )?;
    world.insert_dynamic(
        PLAYER,
        DynamicBody::new(
            Polygon::new(vec![
                Vector2::new(-25.0, -20.0),
                Vector2::new(0.0, 20.0),
                Vector2::new(25.0, -20.0),
            ])?,
            Vector2::new(0.0, 500.0),
        )?
        .with_color(Color::rgb(100, 160, 255)),
    )?;

    Ok(world)
}

fn main() -> polyslide::Result<()> {
    init_logging();

    // steer right for a second, then left, forever
    let steer = |world: &mut PhysicsWorld, dt: f32| {
        let direction = if (world.tick_count() / 100) % 2 == 0 { 1.0 } else { -1.0 };
        if let Err(e) = world.accelerate(PLAYER, Vector2::new(PUSH * direction, 0.0), dt) {
            warn!("cannot steer: {}", e);
        }
    };

    let handle = FixedStepScheduler::new(build_scene()?)?
        .with_controller(steer)
        .spawn()?;
    let mut reader = handle.reader();

    let camera = Camera::default();
    let matrices = camera.matrices(Viewport::new(1280, 720))?;
    let mut batch = DrawBatch::new();

    let start = Instant::now();
    let mut frame = 0u64;
    let mut reset = false;
    while start.elapsed() < Duration::from_secs(4) {
        let sample = reader.sample();

        batch.clear();
        batch.extend(&extract(&sample));

        if frame % 30 == 0 {
            if let Some(position) = sample.dynamic_position(PLAYER) {
                info!(
                    "frame {} tick {} alpha {:.2}: player at {} (pixel {}), {} triangles, tick estimate {:?}",
                    frame,
                    sample.tick,
                    sample.alpha,
                    position,
                    matrices.to_pixel(position),
                    batch.triangle_count(),
                    reader.predicted_tick(),
                );
            }
        }

        if !reset && start.elapsed() > Duration::from_secs(2) {
            info!("resetting player");
            handle.send(PLAYER, BodyCommand::SetVelocity(Vector2::ZERO))?;
            handle.send(PLAYER, BodyCommand::SetPosition(Vector2::new(0.0, 500.0)))?;
            reset = true;
        }

        frame += 1;
        thread::sleep(Duration::from_millis(16));
    }

    let world = handle.stop()?;
    info!("stopped after {} ticks and {} frames", world.tick_count(), frame);
    Ok(())
}
