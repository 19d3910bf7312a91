use std::any::type_name;
use std::fmt;

/// The capabilities a [`Pool`][crate::Pool] needs to manage instances of `T`.
///
/// The pool calls these at well-defined points and never touches the instances otherwise:
///
/// * [`create()`][Self::create] when an instance is requested and none is available, or when
///   pre-warming. A freshly created instance is assumed to already be usable.
/// * [`deactivate()`][Self::deactivate] when an instance is returned to the pool and on each
///   pre-warmed instance.
/// * [`activate()`][Self::activate] when a previously deactivated instance is handed out again.
///
/// A panic in any of these propagates to the caller of the pool operation. The pool runs the
/// hook before it changes any bookkeeping, so the instance stays where it was.
///
/// For simple cases, [`FnLifecycle`] builds a lifecycle out of three closures.
///
/// # Example
///
/// ```rust
/// use recycling_pool::{Lifecycle, Pool};
///
/// struct Connection {
///     open: bool,
/// }
///
/// #[derive(Default)]
/// struct Connections {
///     opened: usize,
/// }
///
/// impl Lifecycle<Connection> for Connections {
///     fn create(&mut self) -> Connection {
///         self.opened += 1;
///         Connection { open: true }
///     }
///
///     fn deactivate(&mut self, item: &mut Connection) {
///         item.open = false;
///     }
///
///     fn activate(&mut self, item: &mut Connection) {
///         item.open = true;
///     }
/// }
///
/// let mut pool = Pool::with_lifecycle(Connections::default());
///
/// let key = pool.acquire();
/// assert!(pool.get(key).open);
/// assert_eq!(pool.lifecycle().opened, 1);
/// ```
pub trait Lifecycle<T> {
    /// Creates a brand-new, usable instance.
    fn create(&mut self) -> T;

    /// Makes an instance inert. Called on every instance that enters the available set.
    fn deactivate(&mut self, item: &mut T);

    /// Reverses [`deactivate()`][Self::deactivate], making the instance usable again.
    fn activate(&mut self, item: &mut T);
}

/// A [`Lifecycle`] assembled from a factory closure and two state-toggling closures.
///
/// This is what [`Pool::new()`][crate::Pool::new] and
/// [`Pool::with_prewarmed()`][crate::Pool::with_prewarmed] use under the hood.
///
/// # Example
///
/// ```rust
/// use recycling_pool::{FnLifecycle, Pool};
///
/// let lifecycle = FnLifecycle::new(
///     || Vec::<u8>::with_capacity(1024),
///     |buffer: &mut Vec<u8>| buffer.clear(),
///     |_: &mut Vec<u8>| {},
/// );
///
/// let mut pool = Pool::builder(lifecycle).prewarm(4).build();
/// assert_eq!(pool.available_count(), 4);
/// ```
pub struct FnLifecycle<F, D, A> {
    factory: F,
    deactivate: D,
    activate: A,
}

impl<F, D, A> FnLifecycle<F, D, A> {
    /// Bundles the three closures into a lifecycle.
    #[must_use]
    pub fn new<T>(factory: F, deactivate: D, activate: A) -> Self
    where
        F: FnMut() -> T,
        D: FnMut(&mut T),
        A: FnMut(&mut T),
    {
        Self {
            factory,
            deactivate,
            activate,
        }
    }
}

impl<T, F, D, A> Lifecycle<T> for FnLifecycle<F, D, A>
where
    F: FnMut() -> T,
    D: FnMut(&mut T),
    A: FnMut(&mut T),
{
    fn create(&mut self) -> T {
        (self.factory)()
    }

    fn deactivate(&mut self, item: &mut T) {
        (self.deactivate)(item);
    }

    fn activate(&mut self, item: &mut T) {
        (self.activate)(item);
    }
}

impl<F, D, A> fmt::Debug for FnLifecycle<F, D, A> {
    #[cfg_attr(test, mutants::skip)] // Cosmetic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>()).finish_non_exhaustive()
    }
}
