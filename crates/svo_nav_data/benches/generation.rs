use svo_nav_core::prelude::*;
use svo_nav_data::prelude::*;
use utilities::data_sets::{PillarScene, SphereScene};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const VOXEL_SIZE: f32 = 100.0;

fn volume(edge_length: f32) -> Extent3f {
    Extent3f::from_min_and_shape(Point3f::ZERO, Point3f::fill(edge_length))
}

fn generate_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_sphere");
    for power in [3, 4, 5].iter() {
        let edge_length = VOXEL_SIZE * (1 << *power) as f32;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_length),
            &edge_length,
            |b, &edge_length| {
                let scene = SphereScene::centered_in_cube(edge_length, VOXEL_SIZE);
                let world = |c: Point3f, h: f32| scene.is_box_occluded(c, h);
                let settings = BoundsGenerationSettings::with_voxel_size(VOXEL_SIZE);
                b.iter(|| BoundsNavigationData::generate(volume(edge_length), &settings, &world));
            },
        );
    }
    group.finish();
}

fn generate_pillars(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_pillars");
    for power in [3, 4, 5].iter() {
        let edge_length = VOXEL_SIZE * (1 << *power) as f32;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_length),
            &edge_length,
            |b, &edge_length| {
                let scene = PillarScene::new(edge_length, 4, VOXEL_SIZE);
                let world = |c: Point3f, h: f32| scene.is_box_occluded(c, h);
                let settings = BoundsGenerationSettings::with_voxel_size(VOXEL_SIZE);
                b.iter(|| BoundsNavigationData::generate(volume(edge_length), &settings, &world));
            },
        );
    }
    group.finish();
}

fn traversable_neighbors_of_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversable_neighbors_of_sphere");
    for power in [3, 4, 5].iter() {
        let edge_length = VOXEL_SIZE * (1 << *power) as f32;
        group.bench_with_input(
            BenchmarkId::from_parameter(edge_length),
            &edge_length,
            |b, &edge_length| {
                let scene = SphereScene::centered_in_cube(edge_length, VOXEL_SIZE);
                let world = |c: Point3f, h: f32| scene.is_box_occluded(c, h);
                let settings = BoundsGenerationSettings::with_voxel_size(VOXEL_SIZE);
                let data = BoundsNavigationData::generate(volume(edge_length), &settings, &world)
                    .unwrap();
                let links: Vec<_> = (0..data.octree_data().layer(0).len())
                    .map(|i| OctreeLink::new(0, i as NodeIndex, 0))
                    .collect();
                b.iter(|| {
                    for link in links.iter() {
                        black_box(data.traversable_neighbors(*link));
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    generate_sphere,
    generate_pillars,
    traversable_neighbors_of_sphere
);
criterion_main!(benches);
