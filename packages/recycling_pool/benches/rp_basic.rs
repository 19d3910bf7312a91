//! Basic benchmarks for the `recycling_pool` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use criterion::{Criterion, criterion_group, criterion_main};
use recycling_pool::{FnLifecycle, Pool};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = Vec<u8>;
type TestLifecycle = FnLifecycle<fn() -> TestItem, fn(&mut TestItem), fn(&mut TestItem)>;

const ITEM_SIZE: usize = 1024;

fn create() -> TestItem {
    vec![0; ITEM_SIZE]
}

fn deactivate(item: &mut TestItem) {
    item.fill(0);
}

fn activate(_item: &mut TestItem) {}

fn new_pool(prewarm: usize) -> Pool<TestItem, TestLifecycle> {
    Pool::builder(FnLifecycle::new(
        create as fn() -> TestItem,
        deactivate as fn(&mut TestItem),
        activate as fn(&mut TestItem),
    ))
    .prewarm(prewarm)
    .build()
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("recycling_basic");

    group.bench_function("build_empty", |b| {
        b.iter(|| drop(black_box(new_pool(0))));
    });

    group.bench_function("acquire_fresh", |b| {
        b.iter_custom(|iters| {
            let mut pools = iter::repeat_with(|| new_pool(0))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let start = Instant::now();

            for pool in &mut pools {
                _ = black_box(pool.acquire());
            }

            start.elapsed()
        });
    });

    group.bench_function("acquire_reused", |b| {
        b.iter_custom(|iters| {
            let mut pools = iter::repeat_with(|| new_pool(1))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let start = Instant::now();

            for pool in &mut pools {
                _ = black_box(pool.acquire());
            }

            start.elapsed()
        });
    });

    group.bench_function("acquire_release_cycle", |b| {
        let mut pool = new_pool(1);

        b.iter(|| {
            let key = pool.acquire();
            pool.release(black_box(key)).unwrap();
        });
    });

    group.bench_function("release_among_many_active", |b| {
        b.iter_custom(|iters| {
            let mut pool = new_pool(0);
            let keys = (0..iters).map(|_| pool.acquire()).collect::<Vec<_>>();

            let start = Instant::now();

            // Every release shifts the remaining active keys down, so the cost per release grows
            // with the size of the active set.
            for key in keys {
                pool.release(black_box(key)).unwrap();
            }

            start.elapsed()
        });
    });

    group.finish();
}
