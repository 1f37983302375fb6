use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polyslide::{
    shapes::{triangulate, Polygon, PolygonGeometry},
    BodyId, DynamicBody, PhysicsWorld, StaticBody, Vector2,
};

fn star(sides: usize) -> Polygon {
    let step = std::f32::consts::TAU / sides as f32;
    let points = (0..sides)
        .map(|i| {
            let radius = if i % 2 == 0 { 10.0 } else { 6.0 };
            let angle = -(i as f32) * step;
            Vector2::new(angle.cos(), angle.sin()) * radius
        })
        .collect::<Vec<_>>();
    Polygon::new(points).unwrap()
}

fn sliding_world(bodies: i32) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world
        .insert_static(
            BodyId(0),
            StaticBody::new(Polygon::rectangle(5000.0, 10.0).unwrap(), Vector2::ZERO).unwrap(),
        )
        .unwrap();
    world
        .insert_static(
            BodyId(1),
            StaticBody::new(star(16), Vector2::new(0.0, 40.0)).unwrap(),
        )
        .unwrap();
    for i in 0..bodies {
        let body = DynamicBody::new(Polygon::regular(8, 3.0).unwrap(), Vector2::new(i as f32 * 8.0 - 400.0, 20.0))
            .unwrap()
            .with_velocity(Vector2::new(150.0, -300.0));
        world.add_dynamic(body).unwrap();
    }
    world
}

fn bench_preprocessing(c: &mut Criterion) {
    let polygon = star(64);
    c.bench_function("triangulate_star_64", |b| {
        b.iter(|| triangulate(black_box(polygon.points())).unwrap())
    });
    c.bench_function("polygon_geometry_star_64", |b| {
        b.iter(|| PolygonGeometry::compute(black_box(&polygon)).unwrap())
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut world = sliding_world(100);
    c.bench_function("tick_100_sliding_bodies", |b| {
        b.iter(|| world.step(black_box(0.01)))
    });

    let world = sliding_world(100);
    c.bench_function("snapshot_100_bodies", |b| {
        b.iter(|| black_box(world.snapshot()))
    });
}

criterion_group!(benches, bench_preprocessing, bench_tick);
criterion_main!(benches);
