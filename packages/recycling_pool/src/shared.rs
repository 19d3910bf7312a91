use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::{Key, Lifecycle, Pool, Result};

/// A cloneable, thread-safe handle to a [`Pool`].
///
/// [`Pool`] itself does no synchronization. This wrapper guards it with a mutex so that any
/// number of threads can acquire and release instances. Every operation takes the lock for its
/// whole duration, including the time spent in the lifecycle hooks.
///
/// Use [`lock()`][Self::lock] when several steps must happen without other threads interleaving,
/// e.g. when inspecting the [active snapshot][Pool::active_snapshot].
///
/// # Example
///
/// ```rust
/// use std::thread;
///
/// use recycling_pool::{Pool, SharedPool};
///
/// let pool = SharedPool::new(Pool::new(
///     || String::with_capacity(64),
///     |s: &mut String| s.clear(),
///     |_: &mut String| {},
/// ));
///
/// thread::scope(|scope| {
///     for _ in 0..4 {
///         let pool = pool.clone();
///
///         scope.spawn(move || {
///             let key = pool.acquire();
///             pool.with_mut(key, |text| text.push_str("busy"));
///             pool.release(key).unwrap();
///         });
///     }
/// });
///
/// assert_eq!(pool.active_count(), 0);
/// assert!(pool.available_count() <= 4);
/// ```
pub struct SharedPool<T, L> {
    inner: Arc<Mutex<Pool<T, L>>>,
}

impl<T, L> SharedPool<T, L>
where
    L: Lifecycle<T>,
{
    /// Wraps a pool so it can be shared between threads.
    #[must_use]
    pub fn new(pool: Pool<T, L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Hands out an instance. See [`Pool::acquire()`].
    #[must_use]
    pub fn acquire(&self) -> Key {
        self.inner.lock().acquire()
    }

    /// Returns an instance to the pool. See [`Pool::release()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`][crate::Error::InvalidState] if the instance is not
    /// currently active or the key was issued by a different pool.
    pub fn release(&self, key: Key) -> Result<()> {
        self.inner.lock().release(key)
    }

    /// Creates `count` more deactivated instances. See [`Pool::prewarm()`].
    pub fn prewarm(&self, count: usize) {
        self.inner.lock().prewarm(count);
    }
}

impl<T, L> SharedPool<T, L> {
    /// Calls `f` with a shared reference to an active instance while holding the lock.
    ///
    /// The lock is not reentrant. Calling any method of this pool (or of a clone of this handle)
    /// from inside `f` deadlocks.
    ///
    /// # Panics
    ///
    /// Panics if the key is not associated with an active instance in this pool.
    pub fn with<R>(&self, key: Key, f: impl FnOnce(&T) -> R) -> R {
        f(self.inner.lock().get(key))
    }

    /// Calls `f` with an exclusive reference to an active instance while holding the lock.
    ///
    /// The lock is not reentrant. Calling any method of this pool (or of a clone of this handle)
    /// from inside `f` deadlocks.
    ///
    /// # Panics
    ///
    /// Panics if the key is not associated with an active instance in this pool.
    pub fn with_mut<R>(&self, key: Key, f: impl FnOnce(&mut T) -> R) -> R {
        f(self.inner.lock().get_mut(key))
    }

    /// The number of instances currently handed out.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }

    /// The number of deactivated instances waiting to be reused.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.inner.lock().available_count()
    }

    /// The number of distinct instances the pool has created.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.inner.lock().total_count()
    }

    /// Locks the pool for exclusive use by the calling thread until the guard is dropped.
    ///
    /// Other methods of this handle block while the guard is alive, including on this thread.
    pub fn lock(&self) -> MutexGuard<'_, Pool<T, L>> {
        self.inner.lock()
    }
}

impl<T, L> Clone for SharedPool<T, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, L> From<Pool<T, L>> for SharedPool<T, L>
where
    L: Lifecycle<T>,
{
    fn from(pool: Pool<T, L>) -> Self {
        Self::new(pool)
    }
}

impl<T, L> fmt::Debug for SharedPool<T, L> {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(type_name::<Self>());

        // The formatting thread may already hold the guard, so never block here.
        match self.inner.try_lock() {
            Some(pool) => debug.field("pool", &*pool),
            None => debug.field("pool", &format_args!("<locked>")),
        };

        debug.finish()
    }
}
