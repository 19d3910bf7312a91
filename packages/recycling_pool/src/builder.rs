use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{Lifecycle, Pool, ReuseOrder};

/// Builder for creating an instance of [`Pool`].
///
/// You only need to use this builder if you want to customize the pool configuration.
/// [`Pool::new()`][1], [`Pool::with_prewarmed()`][2] and [`Pool::with_lifecycle()`][3] cover
/// the common cases.
///
/// # Examples
///
/// ```
/// use recycling_pool::{FnLifecycle, Pool, ReuseOrder};
///
/// let lifecycle = FnLifecycle::new(String::new, |s: &mut String| s.clear(), |_: &mut String| {});
///
/// let pool = Pool::builder(lifecycle)
///     .prewarm(8)
///     .reuse_order(ReuseOrder::OldestFirst)
///     .build();
///
/// assert_eq!(pool.available_count(), 8);
/// ```
///
/// [1]: Pool::new
/// [2]: Pool::with_prewarmed
/// [3]: Pool::with_lifecycle
#[must_use]
pub struct PoolBuilder<T, L> {
    lifecycle: L,
    prewarm: usize,
    initial_capacity: usize,
    reuse_order: ReuseOrder,

    _item: PhantomData<fn() -> T>,
}

impl<T, L> fmt::Debug for PoolBuilder<T, L> {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("prewarm", &self.prewarm)
            .field("initial_capacity", &self.initial_capacity)
            .field("reuse_order", &self.reuse_order)
            .finish_non_exhaustive()
    }
}

impl<T, L> PoolBuilder<T, L>
where
    L: Lifecycle<T>,
{
    pub(crate) fn new(lifecycle: L) -> Self {
        Self {
            lifecycle,
            prewarm: 0,
            initial_capacity: 0,
            reuse_order: ReuseOrder::default(),
            _item: PhantomData,
        }
    }

    /// Sets how many instances to create, deactivate and place in the available set
    /// while building the pool. Defaults to zero.
    ///
    /// The activation hook is never called while pre-warming.
    ///
    /// # Examples
    ///
    /// ```
    /// use recycling_pool::{FnLifecycle, Pool};
    ///
    /// let lifecycle = FnLifecycle::new(|| 1_i32, |_: &mut i32| {}, |_: &mut i32| {});
    /// let pool = Pool::builder(lifecycle).prewarm(3).build();
    ///
    /// assert_eq!(pool.available_count(), 3);
    /// assert_eq!(pool.active_count(), 0);
    /// ```
    pub fn prewarm(mut self, count: usize) -> Self {
        self.prewarm = count;
        self
    }

    /// Reserves bookkeeping space for at least this many instances up front.
    ///
    /// This does not create any instances. Pre-warmed instances are always accounted for, so
    /// there is no need to include them here.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the [reuse order][ReuseOrder] for the pool. This governs which available instance
    /// is handed out when several are waiting.
    pub fn reuse_order(mut self, order: ReuseOrder) -> Self {
        self.reuse_order = order;
        self
    }

    /// Builds the pool with the specified configuration, pre-warming it if requested.
    ///
    /// # Panics
    ///
    /// Propagates any panic from the lifecycle hooks called while pre-warming.
    #[must_use]
    pub fn build(self) -> Pool<T, L> {
        let capacity = self.initial_capacity.max(self.prewarm);

        let mut pool = Pool::new_inner(self.lifecycle, self.reuse_order, capacity);
        pool.prewarm(self.prewarm);
        pool
    }
}
