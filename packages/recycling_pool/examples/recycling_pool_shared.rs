//! Example that shares one pool between several worker threads.
//!
//! Each worker borrows a scratch buffer, fills it, and returns it. Buffers are reused across
//! workers, so the total number of buffers created stays at most the number of workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use recycling_pool::{Pool, SharedPool};

const WORKERS: usize = 4;
const JOBS_PER_WORKER: usize = 100;

fn main() {
    println!("=== Recycling Pool Shared Example ===");

    let created = AtomicUsize::new(0);

    let pool = SharedPool::new(Pool::new(
        || {
            created.fetch_add(1, Ordering::Relaxed);
            Vec::<u64>::with_capacity(1024)
        },
        |buffer: &mut Vec<u64>| buffer.clear(),
        |_: &mut Vec<u64>| {},
    ));

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let pool = pool.clone();

            scope.spawn(move || {
                for job in 0..JOBS_PER_WORKER {
                    let key = pool.acquire();

                    let sum = pool.with_mut(key, |buffer| {
                        buffer.extend((0..64).map(|i| i * job as u64));
                        buffer.iter().sum::<u64>()
                    });

                    if job == 0 {
                        println!("Worker {worker} first job sum: {sum}");
                    }

                    pool.release(key).unwrap();
                }
            });
        }
    });

    println!(
        "Jobs run: {}, buffers created: {}",
        WORKERS * JOBS_PER_WORKER,
        created.load(Ordering::Relaxed)
    );

    println!("Shared example completed successfully!");
}
