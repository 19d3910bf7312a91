/// Determines which available instance a pool hands out when more than one is waiting for reuse.
///
/// By default, the pool hands out the instance that has been waiting the longest.
///
/// # Examples
///
/// ```
/// use recycling_pool::{FnLifecycle, Pool, ReuseOrder};
///
/// let lifecycle = FnLifecycle::new(|| 0_u64, |_: &mut u64| {}, |_: &mut u64| {});
///
/// // The reuse order is set at pool creation time.
/// let pool = Pool::builder(lifecycle)
///     .reuse_order(ReuseOrder::NewestFirst)
///     .build();
///
/// assert_eq!(pool.reuse_order(), ReuseOrder::NewestFirst);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum ReuseOrder {
    /// The instance that entered the available set first is reused first (FIFO). This is the
    /// default.
    ///
    /// Pre-warmed instances are reused in the order they were created.
    #[default]
    OldestFirst,

    /// The instance that entered the available set last is reused first (LIFO).
    ///
    /// This tends to hand out the same few instances over and over, which may be friendlier to
    /// caches when the instances are large.
    NewestFirst,
}
