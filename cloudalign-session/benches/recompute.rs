use cloudalign_core::{Point3d, PointCloud, Transform3D};
use cloudalign_session::{CloudEntry, PARALLEL_THRESHOLD};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn grid_cloud(size: usize) -> PointCloud {
    let points = (0..size)
        .map(|i| {
            Point3d::new(
                (i % 100) as f64 * 0.1,
                ((i / 100) % 100) as f64 * 0.1,
                (i / 10_000) as f64 * 0.1,
            )
        })
        .collect();
    PointCloud::from_points(points)
}

fn bench_recompute(c: &mut Criterion) {
    let transform = Transform3D::from_euler_translation(0.2, -0.4, 1.1, 3.0, -2.0, 0.5);
    let mut group = c.benchmark_group("recompute");

    for size in [PARALLEL_THRESHOLD / 2, 4 * PARALLEL_THRESHOLD] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut entry = CloudEntry::from_cloud(grid_cloud(size));
            b.iter(|| {
                entry.push_transform(transform);
                entry.pop_transform();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
