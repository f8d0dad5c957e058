use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cmap_grid::mesh_generation::{hex_grid, unit_grid};
use cmap_grid::prelude::*;

fn walk_all(map: &CombinatorialMap, policy: OrbitPolicy) -> usize {
    map.darts()
        .map(|d| map.orbit(d, policy).map(Iterator::count).unwrap_or(0))
        .sum()
}

fn bench_orbits(c: &mut Criterion) {
    let mut group = c.benchmark_group("orbits");

    let quads = unit_grid(128, 128).expect("quad grid");
    let hexes = hex_grid(12, 12, 12).expect("hex grid");

    for policy in [OrbitPolicy::Face, OrbitPolicy::Vertex, OrbitPolicy::Edge] {
        group.bench_with_input(
            BenchmarkId::new("quad_2d", format!("{policy:?}")),
            &policy,
            |b, &policy| b.iter(|| black_box(walk_all(&quads, policy))),
        );
        group.bench_with_input(
            BenchmarkId::new("hex_3d", format!("{policy:?}")),
            &policy,
            |b, &policy| b.iter(|| black_box(walk_all(&hexes, policy))),
        );
    }

    group.bench_function("enumerate_faces_3d", |b| {
        b.iter(|| {
            let map = hexes.clone();
            black_box(map.faces().map(<[FaceId]>::len))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_orbits);
criterion_main!(benches);
