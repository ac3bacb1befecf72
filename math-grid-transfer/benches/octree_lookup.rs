//! Benchmark: octree build and point lookup
//!
//! Measures how index construction and point location scale with the
//! number of mesh elements, with and without the locator cache.
//!
//! Run with:
//!   cargo bench -p math-grid-transfer --bench octree_lookup

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fem::ElementType;
use fem::mesh::{Point, box_mesh_tetrahedra};
use math_grid_transfer::{OctTree, OctreeConfig, PointLocator};
use std::time::Duration;

/// Query points in sweep order: a regular lattice walked x-fastest
fn lattice(n: usize) -> Vec<Point> {
    let h = 1.0 / n as f64;
    let mut points = Vec::with_capacity(n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                points.push(Point::new(
                    (i as f64 + 0.37) * h,
                    (j as f64 + 0.53) * h,
                    (k as f64 + 0.29) * h,
                ));
            }
        }
    }
    points
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_build");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    // n³ cells → 6n³ tetrahedra
    for &n in &[4, 8, 12, 16] {
        let mesh = box_mesh_tetrahedra([0.0; 3], [1.0; 3], [n, n, n]);
        group.throughput(Throughput::Elements(mesh.num_elements() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &mesh, |b, mesh| {
            b.iter(|| OctTree::build(black_box(mesh), OctreeConfig::default()))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_lookup");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    let points = lattice(20);
    for &n in &[4, 8, 16] {
        let mesh = box_mesh_tetrahedra([0.0; 3], [1.0; 3], [n, n, n]);
        let Ok(tree) = OctTree::build(&mesh, OctreeConfig::default()) else {
            continue;
        };
        group.throughput(Throughput::Elements(points.len() as u64));

        group.bench_with_input(BenchmarkId::new("tree", n), &points, |b, points| {
            b.iter(|| {
                points
                    .iter()
                    .filter_map(|p| tree.find_element(black_box(p)))
                    .count()
            })
        });

        group.bench_with_input(BenchmarkId::new("cached", n), &points, |b, points| {
            b.iter(|| {
                let mut locator = PointLocator::new(&tree);
                points
                    .iter()
                    .filter_map(|p| locator.locate(black_box(p)).ok())
                    .count()
            })
        });
    }
    group.finish();
}

fn bench_hex_vs_tet(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_by_element_type");
    let points = lattice(12);
    for element_type in [ElementType::Tet4, ElementType::Hex8, ElementType::Hex27] {
        let mesh = fem::mesh::unit_cube(element_type, 6);
        let Ok(tree) = OctTree::build(&mesh, OctreeConfig::default()) else {
            continue;
        };
        group.bench_function(format!("{:?}", element_type), |b| {
            b.iter(|| {
                let mut locator = PointLocator::new(&tree);
                points
                    .iter()
                    .filter_map(|p| locator.locate(black_box(p)).ok())
                    .count()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup, bench_hex_vs_tet);
criterion_main!(benches);
