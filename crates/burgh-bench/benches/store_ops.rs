//! Criterion micro-benchmarks for the container structures.

use std::hint::black_box;

use burgh_bench::filled_occupancy;
use burgh_store::{HashTable, Pool, Reusable};
use criterion::{criterion_group, criterion_main, Criterion};

#[derive(Default)]
struct Segment {
    commands: Vec<u64>,
}

impl Reusable for Segment {
    fn reset(&mut self) {
        self.commands.clear();
    }
}

/// Benchmark: steady-state occupancy churn (remove + insert pairs on a
/// filled array — every insert lands in a hole).
fn bench_occupancy_churn(c: &mut Criterion) {
    let mut array = filled_occupancy(4096, 256);
    c.bench_function("occupancy_churn_256", |b| {
        b.iter(|| {
            for index in (0..4096).step_by(16) {
                black_box(array.remove(index));
                black_box(array.insert(index as u64));
            }
        });
    });
}

/// Benchmark: pool obtain/discard cycles at steady state.
fn bench_pool_recycle(c: &mut Criterion) {
    let mut pool: Pool<Segment> = Pool::new();
    c.bench_function("pool_recycle_8", |b| {
        b.iter(|| {
            let held: Vec<_> = (0..8).map(|_| pool.obtain().0).collect();
            for index in held {
                pool.discard(index);
            }
        });
    });
}

/// Benchmark: hash table lookups over a settings-sized table.
fn bench_hash_lookup(c: &mut Criterion) {
    let mut table: HashTable<u32> = HashTable::new();
    let keys: Vec<String> = (0..512).map(|i| format!("setting/{i}")).collect();
    for (i, key) in keys.iter().enumerate() {
        table.insert(key, i as u32);
    }
    c.bench_function("hash_lookup_512", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(table.get(key));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_occupancy_churn,
    bench_pool_recycle,
    bench_hash_lookup
);
criterion_main!(benches);
