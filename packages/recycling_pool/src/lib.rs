#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! An object pool that recycles expensive-to-create instances instead of constructing and
//! discarding them over and over.
//!
//! The pool is parameterized by a [`Lifecycle`] that knows how to create a new instance, how to
//! deactivate an instance when it is returned to the pool and how to activate it again when it
//! is handed out a second time. The pool itself never inspects the instances. It only tracks
//! which of them are currently *active* (handed out to a caller) and which are *available*
//! (deactivated and waiting to be reused).
//!
//! # Key Features
//!
//! - **Reuse before creation**: [`Pool::acquire()`] only calls the factory when no deactivated
//!   instance is available.
//! - **Pre-warming**: a pool can be filled with deactivated instances up front.
//! - **Checked release**: releasing an instance twice, or releasing a key from another pool, is
//!   reported as an [`Error::InvalidState`] instead of corrupting the pool.
//! - **Deterministic reuse order**: oldest-first by default, newest-first on request via
//!   [`ReuseOrder`].
//! - **Never destroys**: every instance the factory produced stays owned by the pool until the
//!   pool itself is dropped.
//!
//! # Example
//!
//! ```rust
//! use recycling_pool::Pool;
//!
//! #[derive(Debug)]
//! struct Sprite {
//!     visible: bool,
//! }
//!
//! let mut pool = Pool::with_prewarmed(
//!     || Sprite { visible: true },
//!     |sprite: &mut Sprite| sprite.visible = false,
//!     |sprite: &mut Sprite| sprite.visible = true,
//!     2,
//! );
//!
//! assert_eq!(pool.available_count(), 2);
//!
//! let key = pool.acquire();
//! assert!(pool.get(key).visible);
//! assert_eq!(pool.active_count(), 1);
//!
//! pool.release(key).unwrap();
//! assert_eq!(pool.available_count(), 2);
//!
//! // Releasing the same instance again is rejected.
//! assert!(pool.release(key).is_err());
//! ```
//!
//! # Thread safety
//!
//! [`Pool`] performs no internal synchronization. It can be moved to another thread if the
//! instances and the lifecycle can be, but all operations take `&self` or `&mut self`. Use
//! [`SharedPool`] when several threads need to acquire and release instances from the same pool.

mod builder;
mod error;
mod key;
mod lifecycle;
mod pool;
mod reuse_order;
mod shared;
mod snapshot;

pub use builder::*;
pub use error::*;
pub use key::*;
pub use lifecycle::*;
pub use pool::*;
pub use reuse_order::*;
pub use shared::*;
pub use snapshot::*;
