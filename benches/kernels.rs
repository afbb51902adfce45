//! Criterion comparison of the three kernels and the `ndarray` baseline at
//! sizes small enough to sample repeatedly.
//!
//! # Usage:
//! ```bash
//! cargo bench --bench kernels
//!
//! # Single size
//! cargo bench --bench kernels -- matmul_256
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use loopmul::{
    matrix::{random_square, reference_matmul, zeros},
    BenchConfig, Kernel,
};

fn bench_kernels_by_size(c: &mut Criterion) {
    let pool = BenchConfig::default()
        .thread_pool()
        .expect("failed to build rayon pool");

    for size in [64, 128, 256] {
        let mut group = c.benchmark_group(format!("matmul_{size}"));
        group.sample_size(20);
        group.throughput(Throughput::Elements((size * size * size) as u64));

        let a = random_square(size, 42).expect("failed to allocate input");

        group.bench_function("ndarray_dot", |bench| {
            bench.iter(|| black_box(reference_matmul(black_box(&a), black_box(&a))));
        });

        for kernel in Kernel::ALL {
            group.bench_with_input(BenchmarkId::new(kernel.label(), size), &a, |bench, a| {
                // Kernels accumulate, so every iteration gets a fresh zeroed output.
                bench.iter_batched_ref(
                    || zeros(size, size).expect("failed to allocate output"),
                    |out| pool.install(|| kernel.run(black_box(a), black_box(a), out)),
                    criterion::BatchSize::LargeInput,
                );
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_kernels_by_size);
criterion_main!(benches);
