use polyslide::{
    BodyCommand, BodyId, DynamicBody, FixedStepScheduler, GravityType, PhysicsBody, PhysicsWorld,
    Polygon, SimulationConfig, StaticBody, Vector2,
    render::{extract, DrawBatch},
};
use std::thread;
use std::time::{Duration, Instant};

fn scene() -> PhysicsWorld {
    let mut world = PhysicsWorld::with_config(SimulationConfig {
        tick_interval: Duration::from_millis(5),
        ..Default::default()
    })
    .unwrap();
    world
        .insert_static(BodyId(0), StaticBody::new(Polygon::rectangle(100.0, 5.0).unwrap(), Vector2::ZERO).unwrap())
        .unwrap();
    world
        .insert_dynamic(
            BodyId(0),
            DynamicBody::new(Polygon::regular(6, 2.0).unwrap(), Vector2::new(0.0, 20.0)).unwrap(),
        )
        .unwrap();
    world
}

#[test]
fn test_scheduler_publishes_and_stops() {
    let handle = FixedStepScheduler::new(scene()).unwrap().spawn().unwrap();
    let mut reader = handle.reader();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut last_tick = 0;
    while last_tick < 20 && Instant::now() < deadline {
        let sample = reader.sample();
        assert!((0.0..=1.0).contains(&sample.alpha));
        assert!(sample.tick >= last_tick);
        assert!(sample.previous.tick <= sample.current.tick);
        last_tick = sample.tick;
        thread::sleep(Duration::from_millis(1));
    }
    assert!(last_tick >= 20, "only reached tick {}", last_tick);

    let world = handle.stop().unwrap();
    assert!(world.tick_count() >= 20);
    // the hexagon's lowest corner never enters the slab
    let body = world.get_dynamic(BodyId(0)).unwrap();
    assert!(body.position().y - 2.0 >= 5.0 - 1.0e-2);
}

#[test]
fn test_teleport_is_drawn_without_blending() {
    let mut world = scene();
    world.set_gravity(GravityType::None);
    let handle = FixedStepScheduler::new(world).unwrap().spawn().unwrap();
    let mut reader = handle.reader();

    handle
        .send(BodyId(0), BodyCommand::SetPosition(Vector2::new(0.0, 500.0)))
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut arrived = false;
    while !arrived && Instant::now() < deadline {
        let sample = reader.sample();
        arrived = sample.current.dynamics[&BodyId(0)].position.y > 400.0;
        // the pair straddling the jump is never blended
        if arrived && sample.previous.dynamics[&BodyId(0)].position.y < 400.0 {
            assert!(!sample.interpolate);
            assert_eq!(sample.alpha, 1.0);
            assert_eq!(sample.dynamic_position(BodyId(0)), Some(Vector2::new(0.0, 500.0)));
        }
    }
    assert!(arrived);

    handle.stop().unwrap();
}

#[test]
fn test_samples_extract_into_batches() {
    let handle = FixedStepScheduler::new(scene()).unwrap().spawn().unwrap();
    let mut reader = handle.reader();
    thread::sleep(Duration::from_millis(30));

    let polygons = extract(&reader.sample());
    let mut batch = DrawBatch::new();
    batch.extend(&polygons);

    // slab: 2 triangles, hexagon: 4 triangles
    assert_eq!(polygons.len(), 2);
    assert_eq!(batch.triangle_count(), 6);
    assert!(batch.indices().iter().all(|&i| (i as usize) < batch.vertices().len()));

    drop(handle);
}

#[test]
fn test_controller_drives_world() {
    let mut world = scene();
    world.set_gravity(GravityType::None);
    let handle = FixedStepScheduler::new(world)
        .unwrap()
        .with_controller(|world: &mut PhysicsWorld, dt: f32| {
            world.accelerate(BodyId(0), Vector2::new(100.0, 0.0), dt).ok();
        })
        .spawn()
        .unwrap();

    thread::sleep(Duration::from_millis(50));
    let world = handle.stop().unwrap();
    let body = world.get_dynamic(BodyId(0)).unwrap();
    assert!(body.velocity().x > 0.0);
    assert!(body.position().x > 0.0);
}
