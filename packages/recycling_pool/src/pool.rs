use std::any::type_name;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::{
    ActiveSnapshot, Error, FnLifecycle, Key, Lifecycle, PoolBuilder, Result, ReuseOrder,
    next_pool_id,
};

/// An object pool that recycles instances of `T` instead of creating new ones for every request.
///
/// The pool owns every instance it ever created and partitions them into two disjoint sets:
///
/// * **Active** instances have been handed out by [`acquire()`][1] and not yet returned.
/// * **Available** instances have been returned via [`release()`][2] (or pre-warmed) and have
///   been deactivated by the [`Lifecycle`]. They wait to be activated and handed out again.
///
/// [`acquire()`][1] prefers reusing an available instance and only calls the factory when the
/// available set is empty. The pool never destroys an instance while it is alive, so
/// `active_count() + available_count()` always equals the number of instances the factory has
/// produced.
///
/// Instances are identified by [`Key`]s and accessed via [`get()`][3] and [`get_mut()`][4].
///
/// # Thread safety
///
/// The pool is single-threaded and performs no synchronization. It is [`Send`] if `T` and `L`
/// are, so it can be moved between threads. Wrap it in a [`SharedPool`][5] to use it from
/// multiple threads at the same time.
///
/// # Example
///
/// ```rust
/// use recycling_pool::Pool;
///
/// let mut pool = Pool::new(
///     || vec![0_u8; 4096],
///     |buffer: &mut Vec<u8>| buffer.fill(0),
///     |_: &mut Vec<u8>| {},
/// );
///
/// let key = pool.acquire();
/// pool.get_mut(key)[0] = 42;
/// pool.release(key).unwrap();
///
/// // The buffer was zeroed on release and is now reused instead of allocating a new one.
/// let key = pool.acquire();
/// assert_eq!(pool.get(key)[0], 0);
/// assert_eq!(pool.total_count(), 1);
/// ```
///
/// [1]: Self::acquire
/// [2]: Self::release
/// [3]: Self::get
/// [4]: Self::get_mut
/// [5]: crate::SharedPool
pub struct Pool<T, L> {
    /// Process-unique identity, stamped into every key we issue.
    id: u64,

    lifecycle: L,

    /// Every instance we ever created, addressed by the index stored in its key.
    /// Slots are only ever appended, never removed.
    slots: Vec<Slot<T>>,

    /// Indexes of slots in the available set, in the order they entered it.
    available: VecDeque<usize>,

    /// Keys of instances in the active set, in the order they were handed out.
    active: Vec<Key>,

    reuse_order: ReuseOrder,
}

#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) item: T,
    state: SlotState,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SlotState {
    Available,
    Active,
}

impl<T, F, D, A> Pool<T, FnLifecycle<F, D, A>> {
    /// Creates an empty pool from a factory and two state-toggling closures.
    ///
    /// * `factory` creates a new, already usable instance.
    /// * `deactivate` makes an instance inert when it is returned to the pool.
    /// * `activate` makes a previously deactivated instance usable again.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycling_pool::Pool;
    ///
    /// let pool = Pool::new(|| 0_u32, |_: &mut u32| {}, |_: &mut u32| {});
    ///
    /// assert_eq!(pool.active_count(), 0);
    /// assert_eq!(pool.available_count(), 0);
    /// ```
    #[must_use]
    pub fn new(factory: F, deactivate: D, activate: A) -> Self
    where
        F: FnMut() -> T,
        D: FnMut(&mut T),
        A: FnMut(&mut T),
    {
        Self::with_lifecycle(FnLifecycle::new(factory, deactivate, activate))
    }

    /// Creates a pool that starts with `count` ready-to-use, already deactivated instances.
    ///
    /// The factory and `deactivate` are each called exactly `count` times, `activate` is not
    /// called at all. A `count` of zero is equivalent to [`new()`][Self::new].
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycling_pool::Pool;
    ///
    /// let pool = Pool::with_prewarmed(|| 0_u32, |_: &mut u32| {}, |_: &mut u32| {}, 10);
    ///
    /// assert_eq!(pool.active_count(), 0);
    /// assert_eq!(pool.available_count(), 10);
    /// ```
    ///
    /// # Panics
    ///
    /// Propagates any panic from the factory or `deactivate`.
    #[must_use]
    pub fn with_prewarmed(factory: F, deactivate: D, activate: A, count: usize) -> Self
    where
        F: FnMut() -> T,
        D: FnMut(&mut T),
        A: FnMut(&mut T),
    {
        Self::builder(FnLifecycle::new(factory, deactivate, activate))
            .prewarm(count)
            .build()
    }
}

impl<T, L> Pool<T, L>
where
    L: Lifecycle<T>,
{
    /// Creates an empty pool that manages its instances with the given [`Lifecycle`].
    #[must_use]
    pub fn with_lifecycle(lifecycle: L) -> Self {
        Self::builder(lifecycle).build()
    }

    /// Starts building a new [`Pool`].
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    pub fn builder(lifecycle: L) -> PoolBuilder<T, L> {
        PoolBuilder::new(lifecycle)
    }

    #[must_use]
    pub(crate) fn new_inner(lifecycle: L, reuse_order: ReuseOrder, capacity: usize) -> Self {
        let id = next_pool_id();

        debug!(
            pool_id = id,
            item_type = type_name::<T>(),
            ?reuse_order,
            "created pool"
        );

        Self {
            id,
            lifecycle,
            slots: Vec::with_capacity(capacity),
            available: VecDeque::with_capacity(capacity),
            active: Vec::new(),
            reuse_order,
        }
    }

    /// Hands out an instance, reusing an available one if possible.
    ///
    /// If the available set is not empty, one instance is chosen according to the pool's
    /// [`ReuseOrder`], activated and moved to the active set. Otherwise, the factory creates a
    /// new instance, which goes straight to the active set without being activated.
    ///
    /// Exactly one of the factory or the activation hook is called.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycling_pool::Pool;
    ///
    /// let mut pool = Pool::with_prewarmed(|| 0_u32, |_: &mut u32| {}, |_: &mut u32| {}, 1);
    ///
    /// let reused = pool.acquire();
    /// let created = pool.acquire();
    ///
    /// assert_ne!(reused, created);
    /// assert_eq!(pool.active_count(), 2);
    /// assert_eq!(pool.available_count(), 0);
    /// # pool.release(reused).unwrap();
    /// # pool.release(created).unwrap();
    /// ```
    ///
    /// # Panics
    ///
    /// Propagates any panic from the factory or the activation hook. The pool is left as it was
    /// before the call.
    #[must_use]
    pub fn acquire(&mut self) -> Key {
        match self.next_available() {
            Some(index) => self.reactivate(index),
            None => self.create_active(),
        }
    }

    /// Returns an instance to the pool, deactivating it so it can be reused later.
    ///
    /// The instance is not destroyed. It moves to the back of the available set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycling_pool::Pool;
    ///
    /// let mut pool = Pool::new(|| 0_u32, |_: &mut u32| {}, |_: &mut u32| {});
    ///
    /// let key = pool.acquire();
    /// pool.release(key).unwrap();
    ///
    /// assert_eq!(pool.active_count(), 0);
    /// assert_eq!(pool.available_count(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the instance is not currently active (for example,
    /// because it was already released) or if the key was issued by a different pool. The pool
    /// is not changed and no hook is called in that case.
    ///
    /// # Panics
    ///
    /// Propagates any panic from the deactivation hook. The instance stays active in that case.
    pub fn release(&mut self, key: Key) -> Result<()> {
        let Some(index) = self.index_of(key) else {
            warn!(pool_id = self.id, %key, "rejected release of a key from another pool");

            return Err(Error::InvalidState {
                key,
                problem: "the key was not issued by this pool".to_string(),
            });
        };

        let slot = self
            .slots
            .get_mut(index)
            .expect("index_of() only returns indexes of slots that exist");

        if slot.state != SlotState::Active {
            warn!(pool_id = self.id, %key, "rejected release of an instance that is not active");

            return Err(Error::InvalidState {
                key,
                problem: "the instance is not active, it has already been released".to_string(),
            });
        }

        // Hooks run before we touch any bookkeeping, so if this panics the instance stays active.
        self.lifecycle.deactivate(&mut slot.item);
        slot.state = SlotState::Available;

        let position = self
            .active
            .iter()
            .position(|candidate| *candidate == key)
            .expect("every slot in the active state is listed in the active set");

        self.active.remove(position);
        self.available.push_back(index);

        trace!(pool_id = self.id, %key, "released instance");

        Ok(())
    }

    /// Creates `count` more instances, deactivates them and adds them to the available set.
    ///
    /// The activation hook is not called.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycling_pool::Pool;
    ///
    /// let mut pool = Pool::new(|| 0_u32, |_: &mut u32| {}, |_: &mut u32| {});
    /// pool.prewarm(5);
    ///
    /// assert_eq!(pool.available_count(), 5);
    /// ```
    ///
    /// # Panics
    ///
    /// Propagates any panic from the factory or the deactivation hook. Instances completed
    /// before the panic remain in the pool.
    pub fn prewarm(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        self.slots.reserve(count);
        self.available.reserve(count);

        for _ in 0..count {
            let mut item = self.lifecycle.create();
            self.lifecycle.deactivate(&mut item);

            let index = self.slots.len();
            self.slots.push(Slot {
                item,
                state: SlotState::Available,
            });
            self.available.push_back(index);
        }

        debug!(
            pool_id = self.id,
            count,
            total = self.slots.len(),
            "pre-warmed pool"
        );
    }

    fn next_available(&self) -> Option<usize> {
        match self.reuse_order {
            ReuseOrder::OldestFirst => self.available.front().copied(),
            ReuseOrder::NewestFirst => self.available.back().copied(),
        }
    }

    fn reactivate(&mut self, index: usize) -> Key {
        let slot = self
            .slots
            .get_mut(index)
            .expect("the available set only refers to slots that exist");

        // Hooks run before we touch any bookkeeping, so if this panics the instance stays
        // available and nothing is lost.
        self.lifecycle.activate(&mut slot.item);
        slot.state = SlotState::Active;

        let removed = match self.reuse_order {
            ReuseOrder::OldestFirst => self.available.pop_front(),
            ReuseOrder::NewestFirst => self.available.pop_back(),
        };
        debug_assert_eq!(removed, Some(index));

        let key = Key::new(self.id, index);
        self.active.push(key);

        trace!(pool_id = self.id, %key, "reused available instance");

        key
    }

    fn create_active(&mut self) -> Key {
        let item = self.lifecycle.create();

        let index = self.slots.len();
        self.slots.push(Slot {
            item,
            state: SlotState::Active,
        });

        let key = Key::new(self.id, index);
        self.active.push(key);

        debug!(pool_id = self.id, %key, "created new instance");

        key
    }
}

impl<T, L> Pool<T, L> {
    /// Gets a shared reference to an active instance.
    ///
    /// # Panics
    ///
    /// Panics if the key is not associated with an active instance in this pool.
    #[must_use]
    pub fn get(&self, key: Key) -> &T {
        self.slot(key)
            .filter(|slot| slot.state == SlotState::Active)
            .map(|slot| &slot.item)
            .expect("key was not associated with an active instance in the pool")
    }

    /// Gets an exclusive reference to an active instance.
    ///
    /// # Panics
    ///
    /// Panics if the key is not associated with an active instance in this pool.
    #[must_use]
    pub fn get_mut(&mut self, key: Key) -> &mut T {
        self.slot_mut(key)
            .filter(|slot| slot.state == SlotState::Active)
            .map(|slot| &mut slot.item)
            .expect("key was not associated with an active instance in the pool")
    }

    /// Whether the key refers to an instance of this pool that is currently handed out.
    #[must_use]
    pub fn is_active(&self, key: Key) -> bool {
        self.slot(key)
            .is_some_and(|slot| slot.state == SlotState::Active)
    }

    /// A live view of the active set, in the order the instances were handed out.
    ///
    /// The view borrows the pool, so it cannot be held across calls that change the pool.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recycling_pool::Pool;
    ///
    /// let mut counter = 0;
    /// let mut pool = Pool::new(
    ///     move || {
    ///         counter += 1;
    ///         counter
    ///     },
    ///     |_: &mut i32| {},
    ///     |_: &mut i32| {},
    /// );
    ///
    /// let a = pool.acquire();
    /// let b = pool.acquire();
    ///
    /// let active = pool.active_snapshot();
    /// assert_eq!(active.keys(), &[a, b]);
    /// assert_eq!(active.iter().map(|(_, item)| *item).collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn active_snapshot(&self) -> ActiveSnapshot<'_, T> {
        ActiveSnapshot::new(&self.active, &self.slots)
    }

    /// The number of instances currently handed out.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The number of deactivated instances waiting to be reused.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// The number of distinct instances the pool has created, active or not.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.slots.len()
    }

    /// The [reuse order][ReuseOrder] this pool was built with.
    #[must_use]
    pub fn reuse_order(&self) -> ReuseOrder {
        self.reuse_order
    }

    /// The lifecycle that creates, activates and deactivates instances.
    #[must_use]
    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    /// Exclusive access to the lifecycle, e.g. to reconfigure or inspect it between operations.
    #[must_use]
    pub fn lifecycle_mut(&mut self) -> &mut L {
        &mut self.lifecycle
    }

    /// The slot index for a key, if the key was issued by this pool.
    fn index_of(&self, key: Key) -> Option<usize> {
        (key.pool_id() == self.id && key.index() < self.slots.len()).then_some(key.index())
    }

    fn slot(&self, key: Key) -> Option<&Slot<T>> {
        self.index_of(key).and_then(|index| self.slots.get(index))
    }

    fn slot_mut(&mut self, key: Key) -> Option<&mut Slot<T>> {
        self.index_of(key).and_then(|index| self.slots.get_mut(index))
    }

    #[cfg(test)]
    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    pub(crate) fn integrity_check(&self) {
        use std::collections::HashSet;

        assert_eq!(
            self.active.len() + self.available.len(),
            self.slots.len(),
            "every instance must be in exactly one of the two sets"
        );

        let active = self.active.iter().map(|key| key.index()).collect::<HashSet<_>>();
        let available = self.available.iter().copied().collect::<HashSet<_>>();

        assert_eq!(active.len(), self.active.len(), "duplicate in active set");
        assert_eq!(available.len(), self.available.len(), "duplicate in available set");
        assert!(active.is_disjoint(&available), "sets must be disjoint");

        for key in &self.active {
            assert_eq!(key.pool_id(), self.id);
            assert_eq!(
                self.slots.get(key.index()).map(|slot| slot.state),
                Some(SlotState::Active)
            );
        }

        for &index in &self.available {
            assert_eq!(
                self.slots.get(index).map(|slot| slot.state),
                Some(SlotState::Available)
            );
        }
    }
}

impl<T, L> fmt::Debug for Pool<T, L> {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("id", &self.id)
            .field("active_count", &self.active.len())
            .field("available_count", &self.available.len())
            .field("reuse_order", &self.reuse_order)
            .finish_non_exhaustive()
    }
}
