// Search throughput on an open field and on a serpentine maze.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use voxpath_search::batch::{PathQuery, path_distances};
use voxpath_search::{
    AStarPathFinder, Adjustment, Connectivity, FinderConfig, VoxelCoord, VoxelType, VoxelWorld,
};

fn open_field(size: u32) -> VoxelWorld {
    let mut world = VoxelWorld::new(size, 4, size);
    world.fill_layer(0, VoxelType::Stone);
    world
}

/// Rows of walls every fourth z, each with a gap at alternating ends.
fn serpentine(size: u32) -> VoxelWorld {
    let mut world = open_field(size);
    let max = size as i32 - 1;
    for (i, z) in (2..max).step_by(4).enumerate() {
        world.fill_box(VoxelCoord::new(0, 1, z), VoxelCoord::new(max, 2, z), VoxelType::Stone);
        let gap_x = if i % 2 == 0 { max } else { 0 };
        world.fill_box(VoxelCoord::new(gap_x, 1, z), VoxelCoord::new(gap_x, 2, z), VoxelType::Air);
    }
    world
}

fn bench_open_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_field");
    let world = open_field(64);
    let start = VoxelCoord::new(1, 1, 1);
    let end = VoxelCoord::new(60, 1, 45);
    for connectivity in [Connectivity::Face6, Connectivity::Edge18, Connectivity::Vertex26] {
        let config = FinderConfig::default().with_connectivity(connectivity);
        let mut finder = AStarPathFinder::new(&world, config);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{connectivity:?}")),
            &(start, end),
            |b, &(start, end)| b.iter(|| black_box(finder.path_distance(start, end, Adjustment::None))),
        );
    }
    group.finish();
}

fn bench_serpentine(c: &mut Criterion) {
    let mut group = c.benchmark_group("serpentine");
    for size in [16u32, 32, 48] {
        let world = serpentine(size);
        let max = size as i32 - 1;
        let start = VoxelCoord::new(max / 2, 1, 0);
        let end = VoxelCoord::new(max / 2, 1, max);
        let config = FinderConfig::default().with_max_expansions(1_000_000);
        let mut finder = AStarPathFinder::new(&world, config);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(finder.path(start, end, Adjustment::None).len()))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let world = open_field(48);
    let config = FinderConfig::default();
    let queries: Vec<PathQuery> = (0..64)
        .map(|i| {
            PathQuery::new(
                VoxelCoord::new(i % 8, 1, i / 8),
                VoxelCoord::new(47 - i % 8, 1, 47 - i / 8),
            )
        })
        .collect();
    c.bench_function("batch_64_queries", |b| {
        b.iter(|| black_box(path_distances(&world, &config, &queries)))
    });
}

criterion_group!(benches, bench_open_field, bench_serpentine, bench_batch);
criterion_main!(benches);
