use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one instance owned by a [`Pool`][crate::Pool].
///
/// Keys are returned by [`Pool::acquire()`][crate::Pool::acquire] and are used to access and
/// release the instance. Because a pool never destroys its instances, a key keeps referring to
/// the same physical instance for the lifetime of the pool, whether that instance is currently
/// active or waiting in the pool for reuse.
///
/// A key also remembers which pool issued it, so handing it to a different pool is detected.
///
/// # Example
///
/// ```rust
/// use recycling_pool::Pool;
///
/// let mut pool = Pool::new(|| 0_u32, |_: &mut u32| {}, |_: &mut u32| {});
///
/// let first = pool.acquire();
/// pool.release(first).unwrap();
///
/// // The released instance is reused, so we get the same key back.
/// let second = pool.acquire();
/// assert_eq!(first, second);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    pool_id: u64,
    index: usize,
}

impl Key {
    pub(crate) fn new(pool_id: u64, index: usize) -> Self {
        Self { pool_id, index }
    }

    pub(crate) fn pool_id(self) -> u64 {
        self.pool_id
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for Key {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@pool-{}", self.index, self.pool_id)
    }
}

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Hands out a process-unique identifier for a new pool.
pub(crate) fn next_pool_id() -> u64 {
    // Only uniqueness matters, there is no data to synchronize with.
    NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Key: Send, Sync, Copy);

    #[test]
    fn pool_ids_are_unique() {
        let ids = (0..100).map(|_| next_pool_id()).collect::<HashSet<_>>();

        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn keys_from_different_pools_differ() {
        assert_ne!(Key::new(1, 0), Key::new(2, 0));
        assert_eq!(Key::new(1, 5), Key::new(1, 5));
    }
}
