//! Criterion micro-benchmarks for the bit-vector scan family.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use kshim_bench::{strided_bitmap, SCAN_BITS};
use kshim_core::bitops::{
    find_first_set_bit, find_next_clear_bit, find_next_set_bit, iter_set_bits, population_count,
};

/// Benchmark: walk every set bit of a sparse 4096-bit vector via find_next.
fn bench_find_next_sparse(c: &mut Criterion) {
    let v = strided_bitmap(SCAN_BITS, 509);

    c.bench_function("find_next_set_sparse_4096", |b| {
        b.iter(|| {
            let mut nr = find_first_set_bit(&v, SCAN_BITS);
            while nr < SCAN_BITS {
                nr = find_next_set_bit(black_box(&v), SCAN_BITS, nr + 1);
            }
            black_box(nr)
        });
    });
}

/// Benchmark: find the single clear bit at the end of an all-ones vector.
fn bench_find_next_clear_full(c: &mut Criterion) {
    let mut v = strided_bitmap(SCAN_BITS, 1);
    kshim_core::bitops::clear_bit(SCAN_BITS - 1, &mut v);

    c.bench_function("find_next_clear_full_4096", |b| {
        b.iter(|| black_box(find_next_clear_bit(black_box(&v), SCAN_BITS, 0)));
    });
}

/// Benchmark: iterate a dense vector with the set-bit iterator.
fn bench_iter_dense(c: &mut Criterion) {
    let v = strided_bitmap(SCAN_BITS, 3);

    c.bench_function("iter_set_bits_dense_4096", |b| {
        b.iter(|| black_box(iter_set_bits(black_box(&v), SCAN_BITS).count()));
    });
}

/// Benchmark: population count summed across a vector.
fn bench_population_count(c: &mut Criterion) {
    let v = strided_bitmap(SCAN_BITS, 7);

    c.bench_function("population_count_4096", |b| {
        b.iter(|| {
            black_box(&v)
                .iter()
                .map(|&w| population_count(w))
                .sum::<u32>()
        });
    });
}

criterion_group!(
    benches,
    bench_find_next_sparse,
    bench_find_next_clear_full,
    bench_iter_dense,
    bench_population_count
);
criterion_main!(benches);
