//! Benchmarks for chunkpool.
//!
//! Run with:
//!     cargo bench

use std::thread;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use chunkpool::MemoryPool;

fn bench_acquire_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("acquire_release");

    for chunk_size in [4 * 1024, 64 * 1024] {
        let pool = MemoryPool::new(chunk_size, 64).unwrap();

        group.throughput(Throughput::Bytes(chunk_size as u64));
        group.bench_function(format!("pooled_{}kb", chunk_size / 1024), |b| {
            b.iter(|| {
                let mut chunk = pool.get_chunk();
                chunk[0] = black_box(1);
                black_box(chunk.len())
            });
        });

        // Baseline: what the pool saves
        group.bench_function(format!("heap_{}kb", chunk_size / 1024), |b| {
            b.iter(|| {
                let mut buf = vec![0u8; chunk_size];
                buf[0] = black_box(1);
                black_box(buf.len())
            });
        });
    }

    group.finish();
}

fn bench_handles(c: &mut Criterion) {
    let mut group = c.benchmark_group("handles");
    let pool = MemoryPool::new(64, 1024).unwrap();

    group.bench_function("raw_handle", |b| {
        b.iter(|| {
            let mut handle = pool.try_get_chunk_handle();
            pool.release_chunk_handle(&mut handle).unwrap();
            black_box(handle)
        });
    });

    // Burst: drain the pool, then return everything
    group.bench_function("burst_1024", |b| {
        b.iter(|| {
            let chunks: Vec<_> = (0..1024).map(|_| pool.get_chunk()).collect();
            black_box(chunks.len())
        });
    });

    group.finish();
}

fn bench_exhausted(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhausted");
    let pool = MemoryPool::new(64 * 1024, 1).unwrap();
    let _held = pool.get_chunk();

    group.bench_function("standalone_fallback", |b| {
        b.iter(|| black_box(pool.get_chunk().len()));
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    let pool = MemoryPool::new(4 * 1024, 4).unwrap();

    group.bench_function("8_threads", |b| {
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..8 {
                    s.spawn(|| {
                        for _ in 0..100 {
                            let mut chunk = pool.get_chunk();
                            chunk[0] = black_box(1);
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_acquire_release,
    bench_handles,
    bench_exhausted,
    bench_contended
);
criterion_main!(benches);
