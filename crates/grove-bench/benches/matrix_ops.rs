//! Criterion micro-benchmarks for keyed store lookups and enumeration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grove_bench::utilization_map;
use grove_core::{canonical_species, UtilizationClass};
use grove_matrix::{KeyRef, MatrixMap3};
use grove_test_utils::sample_becs;

/// Benchmark: untyped 3-key lookup.
fn bench_get_untyped(c: &mut Criterion) {
    let map = utilization_map(&canonical_species(), &sample_becs()).unwrap();
    let keys = [
        KeyRef::from(UtilizationClass::U175To225),
        KeyRef::from("PL"),
        KeyRef::from("SBS"),
    ];

    c.bench_function("matrix_get_untyped", |b| {
        b.iter(|| black_box(*map.get(black_box(&keys)).unwrap()));
    });
}

/// Benchmark: typed view lookup through a borrowed cast.
fn bench_get_typed(c: &mut Criterion) {
    let map = utilization_map(&canonical_species(), &sample_becs()).unwrap();
    let view = MatrixMap3::<i32, String, String, f32, _>::cast(&map).unwrap();

    c.bench_function("matrix_get_typed", |b| {
        b.iter(|| black_box(*view.get(black_box(&3), "PL", "SBS").unwrap()));
    });
}

/// Benchmark: visit every key tuple of a 4 × 16 × 14 store.
fn bench_each_key(c: &mut Criterion) {
    let map = utilization_map(&canonical_species(), &sample_becs()).unwrap();

    c.bench_function("matrix_each_key", |b| {
        b.iter(|| {
            let mut n = 0usize;
            map.each_key(|keys| n += keys.len());
            black_box(n);
        });
    });
}

criterion_group!(benches, bench_get_untyped, bench_get_typed, bench_each_key);
criterion_main!(benches);
