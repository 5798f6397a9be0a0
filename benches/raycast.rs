use std::sync::Arc;

use cgmath::{Point3, Vector3};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hearth_voxel_grid::world::register_basic_blocks;
use hearth_voxel_grid::{BlockRegistry, ChunkGrid, ColumnPos, Ray, VoxelColumn};

/// 8x8 window of flat terrain, stone up to y = 63
fn terrain_grid() -> ChunkGrid {
    let mut registry = BlockRegistry::new();
    register_basic_blocks(&mut registry).expect("basic blocks");
    let stone = registry.get_id("engine:stone").expect("stone");

    let mut grid = ChunkGrid::new(8, 8, -4, -4, Arc::new(registry));
    for cz in -4..4 {
        for cx in -4..4 {
            grid.put_chunk(VoxelColumn::new(ColumnPos::new(cx, cz)).into_shared());
        }
    }
    for x in -64..64 {
        for z in -64..64 {
            for y in 0..64 {
                grid.set(x, y, z, stone, 0);
            }
        }
    }
    grid
}

fn bench_raycast(c: &mut Criterion) {
    let grid = terrain_grid();
    let look_down = Ray::new(Point3::new(0.5, 70.5, 0.5), Vector3::new(0.3, -1.0, 0.2));
    let horizon = Ray::new(Point3::new(0.5, 70.5, 0.5), Vector3::new(1.0, 0.0, 0.7));

    c.bench_function("ray_cast_hit_ground", |b| {
        b.iter(|| grid.ray_cast(black_box(&look_down), black_box(16.0)))
    });
    c.bench_function("ray_cast_miss_horizon", |b| {
        b.iter(|| grid.ray_cast(black_box(&horizon), black_box(48.0)))
    });
    c.bench_function("ray_cast_to_obstacle", |b| {
        b.iter(|| grid.ray_cast_to_obstacle(black_box(&look_down), black_box(16.0)))
    });
}

fn bench_translate(c: &mut Criterion) {
    let mut grid = terrain_grid();
    c.bench_function("translate_back_and_forth", |b| {
        b.iter(|| {
            grid.translate(black_box(1), black_box(0));
            grid.translate(black_box(-1), black_box(0));
        })
    });
}

criterion_group!(benches, bench_raycast, bench_translate);
criterion_main!(benches);
