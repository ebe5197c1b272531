//! Criterion micro-benchmarks for arena allocation and rewind.

use std::hint::black_box;

use burgh_arena::{Arena, ArenaScope};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: a frame's worth of scratch allocations plus the rewind.
fn bench_frame_scope_cycle(c: &mut Criterion) {
    let mut temp = Arena::with_min_block_size(1 << 20);
    c.bench_function("frame_scope_64x1k", |b| {
        b.iter(|| {
            let mut frame = ArenaScope::enter(&mut temp);
            for _ in 0..64 {
                black_box(frame.alloc(1024));
            }
        });
    });
}

/// Benchmark: raw bump allocation without rewind, fresh arena per batch.
fn bench_bulk_alloc(c: &mut Criterion) {
    c.bench_function("bulk_alloc_256x256", |b| {
        b.iter(|| {
            let mut arena = Arena::with_min_block_size(1 << 16);
            for _ in 0..256 {
                black_box(arena.alloc(256));
            }
            black_box(arena.stats())
        });
    });
}

/// Benchmark: string interning of typical asset-name keys.
fn bench_string_interning(c: &mut Criterion) {
    let names: Vec<String> = (0..128)
        .map(|i| format!("assets/buildings/residential_{i}.sprite"))
        .collect();
    let mut arena = Arena::new();
    c.bench_function("intern_128_names", |b| {
        b.iter(|| {
            arena.mark_reset_position();
            for name in &names {
                black_box(arena.alloc_str(name));
            }
            arena.reset();
        });
    });
}

criterion_group!(
    benches,
    bench_frame_scope_cycle,
    bench_bulk_alloc,
    bench_string_interning
);
criterion_main!(benches);
