//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how to use `Pool` to recycle instances instead of creating new ones.

use recycling_pool::Pool;

#[derive(Debug)]
struct Bullet {
    visible: bool,
    position: (f32, f32),
}

fn main() {
    println!("=== Recycling Pool README Example ===");

    // Start with two bullets ready to go.
    let mut pool = Pool::with_prewarmed(
        || Bullet {
            visible: true,
            position: (0.0, 0.0),
        },
        |bullet: &mut Bullet| bullet.visible = false,
        |bullet: &mut Bullet| {
            bullet.visible = true;
            bullet.position = (0.0, 0.0);
        },
        2,
    );

    // Acquiring reuses a pre-warmed bullet and activates it.
    let first = pool.acquire();
    pool.get_mut(first).position = (10.0, 5.0);
    println!("Fired: {:?}", pool.get(first));

    let second = pool.acquire();
    let third = pool.acquire();
    println!(
        "Active: {}, available: {}",
        pool.active_count(),
        pool.available_count()
    );

    // Releasing deactivates the bullet and keeps it for later.
    pool.release(second).unwrap();
    println!(
        "After release - active: {}, available: {}",
        pool.active_count(),
        pool.available_count()
    );

    for (key, bullet) in pool.active_snapshot() {
        println!("Still flying: {key} at {:?}", bullet.position);
    }

    // Releasing twice is caught.
    if let Err(error) = pool.release(second) {
        println!("Rejected: {error}");
    }

    pool.release(first).unwrap();
    pool.release(third).unwrap();

    println!("README example completed successfully!");
}
