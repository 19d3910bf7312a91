//! Integration tests that verify the bookkeeping guarantees of `Pool` through its public API.
//!
//! Hook invocations are counted through a shared `Counters` value so that each test can assert
//! exactly which hooks an operation called.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "we do not need to worry about these things when writing test code"
)]

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recycling_pool::{Error, Key, Lifecycle, Pool, ReuseOrder};

#[derive(Debug)]
struct Widget {
    serial: usize,
    visible: bool,
}

#[derive(Debug, Default)]
struct Counters {
    created: Cell<usize>,
    deactivated: Cell<usize>,
    activated: Cell<usize>,
}

impl Counters {
    fn snapshot(&self) -> (usize, usize, usize) {
        (
            self.created.get(),
            self.deactivated.get(),
            self.activated.get(),
        )
    }
}

#[derive(Debug)]
struct Widgets {
    counters: Rc<Counters>,
}

impl Lifecycle<Widget> for Widgets {
    fn create(&mut self) -> Widget {
        let serial = self.counters.created.get();
        self.counters.created.set(serial + 1);

        Widget {
            serial,
            visible: true,
        }
    }

    fn deactivate(&mut self, item: &mut Widget) {
        assert!(item.visible, "deactivating an instance that is already inert");

        self.counters
            .deactivated
            .set(self.counters.deactivated.get() + 1);
        item.visible = false;
    }

    fn activate(&mut self, item: &mut Widget) {
        assert!(!item.visible, "activating an instance that is already usable");

        self.counters
            .activated
            .set(self.counters.activated.get() + 1);
        item.visible = true;
    }
}

fn widget_pool(prewarm: usize) -> (Pool<Widget, Widgets>, Rc<Counters>) {
    let counters = Rc::new(Counters::default());

    let pool = Pool::builder(Widgets {
        counters: Rc::clone(&counters),
    })
    .prewarm(prewarm)
    .build();

    (pool, counters)
}

fn assert_partition(pool: &Pool<Widget, Widgets>, counters: &Counters, issued: &HashSet<Key>) {
    let active = pool.active_snapshot();
    let active_keys = active.keys().iter().copied().collect::<HashSet<_>>();

    assert_eq!(active_keys.len(), pool.active_count(), "active set has duplicates");

    for (key, widget) in active {
        assert!(pool.is_active(key));
        assert!(widget.visible, "active instances must be usable");
    }

    for key in issued.difference(&active_keys) {
        assert!(!pool.is_active(*key), "released instance is still active");
    }

    assert_eq!(
        pool.active_count() + pool.available_count(),
        counters.created.get(),
        "every created instance is in exactly one set"
    );
    assert_eq!(pool.total_count(), counters.created.get());
}

#[test]
fn prewarm_creates_deactivated_instances() {
    let (pool, counters) = widget_pool(5);

    assert_eq!(pool.available_count(), 5);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(counters.snapshot(), (5, 5, 0));
}

#[test]
fn prewarm_zero_matches_new() {
    let (pool, counters) = widget_pool(0);

    assert_eq!(pool.available_count(), 0);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(counters.snapshot(), (0, 0, 0));
}

#[test]
fn acquire_with_available_reuses() {
    let (mut pool, counters) = widget_pool(1);
    let before = counters.snapshot();

    let key = pool.acquire();

    assert_eq!(counters.snapshot(), (before.0, before.1, before.2 + 1));
    assert!(pool.get(key).visible);
    assert_eq!(pool.get(key).serial, 0);
}

#[test]
fn acquire_without_available_creates() {
    let (mut pool, counters) = widget_pool(0);

    let key = pool.acquire();

    assert_eq!(counters.snapshot(), (1, 0, 0));
    assert!(pool.get(key).visible);
}

#[test]
fn acquire_then_release_restores_counts() {
    for prewarm in [1, 3] {
        let (mut pool, counters) = widget_pool(prewarm);

        let active_before = pool.active_count();
        let available_before = pool.available_count();
        let deactivated_before = counters.deactivated.get();

        let key = pool.acquire();
        pool.release(key).unwrap();

        assert_eq!(pool.active_count(), active_before);
        assert_eq!(pool.available_count(), available_before);
        assert_eq!(counters.deactivated.get(), deactivated_before + 1);
    }
}

#[test]
fn acquire_then_release_on_empty_pool_keeps_new_instance() {
    let (mut pool, counters) = widget_pool(0);

    let key = pool.acquire();
    pool.release(key).unwrap();

    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.available_count(), 1);
    assert_eq!(counters.snapshot(), (1, 1, 0));
}

#[test]
fn prewarmed_scenario() {
    let (mut pool, counters) = widget_pool(2);

    let first = pool.acquire();
    let second = pool.acquire();

    assert_eq!(counters.created.get(), 2, "both acquires reuse pre-warmed instances");
    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.available_count(), 0);

    let third = pool.acquire();

    assert_eq!(counters.created.get(), 3, "third acquire has to create");
    assert_eq!(pool.active_count(), 3);

    let deactivated_before = counters.deactivated.get();
    pool.release(second).unwrap();

    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.available_count(), 1);
    assert_eq!(counters.deactivated.get(), deactivated_before + 1);
    assert_eq!(pool.active_snapshot().keys(), &[first, third]);
}

#[test]
fn double_release_is_invalid_state() {
    let (mut pool, counters) = widget_pool(0);

    let key = pool.acquire();
    pool.release(key).unwrap();
    let before = counters.snapshot();

    let result = pool.release(key);

    assert!(matches!(result, Err(Error::InvalidState { .. })));
    assert_eq!(counters.snapshot(), before);
    assert_eq!(pool.available_count(), 1);

    // The instance is still reusable exactly once.
    let again = pool.acquire();
    assert_eq!(again, key);
    assert_eq!(pool.available_count(), 0);
}

#[test]
fn release_into_wrong_pool_is_invalid_state() {
    let (mut pool_a, counters_a) = widget_pool(0);
    let (mut pool_b, _counters_b) = widget_pool(0);

    let key_b = pool_b.acquire();

    let result = pool_a.release(key_b);

    assert!(matches!(result, Err(Error::InvalidState { .. })));
    assert_eq!(counters_a.snapshot(), (0, 0, 0));
    assert_eq!(pool_a.available_count(), 0);
    assert!(pool_b.is_active(key_b));
}

#[test]
fn newest_first_hands_out_most_recently_released() {
    let counters = Rc::new(Counters::default());
    let mut pool = Pool::builder(Widgets {
        counters: Rc::clone(&counters),
    })
    .reuse_order(ReuseOrder::NewestFirst)
    .prewarm(3)
    .build();

    let key = pool.acquire();
    assert_eq!(pool.get(key).serial, 2);

    pool.release(key).unwrap();
    assert_eq!(pool.acquire(), key);
}

#[test]
fn oldest_first_hands_out_longest_waiting() {
    let (mut pool, _counters) = widget_pool(3);

    let key = pool.acquire();
    assert_eq!(pool.get(key).serial, 0);

    pool.release(key).unwrap();

    let next = pool.acquire();
    assert_eq!(pool.get(next).serial, 1);
}

#[test]
fn random_operation_sequences_keep_partition() {
    const SEEDS: u64 = 32;
    const OPERATIONS: usize = 500;

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);

        let prewarm = rng.random_range(0..4);
        let (mut pool, counters) = widget_pool(prewarm);

        let mut held = Vec::new();
        let mut issued = HashSet::new();

        for _ in 0..OPERATIONS {
            let available_before = pool.available_count();
            let before = counters.snapshot();

            if held.is_empty() || rng.random_bool(0.55) {
                let key = pool.acquire();
                held.push(key);
                issued.insert(key);

                if available_before > 0 {
                    assert_eq!(counters.snapshot(), (before.0, before.1, before.2 + 1));
                } else {
                    assert_eq!(counters.snapshot(), (before.0 + 1, before.1, before.2));
                }
            } else {
                let index = rng.random_range(0..held.len());
                let key = held.swap_remove(index);

                pool.release(key).unwrap();

                assert_eq!(counters.snapshot(), (before.0, before.1 + 1, before.2));
            }

            assert_eq!(pool.active_count(), held.len());
            assert_partition(&pool, &counters, &issued);
        }
    }
}
