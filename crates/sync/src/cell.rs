use std::fmt;

use parking_lot::lock_api::{self, RawMutex};

use crate::UnfairLock;

/// A value that is only reachable while holding an exclusive lock.
///
/// Every operation (`read`, `write`, `mutate`, `with`, ...) takes the same
/// lock, so they are serialized in the order the lock grants access. There
/// is no shared-read fast path. The lock does not poison: if a callback
/// panics, the lock is released during unwinding and the panic reaches the
/// caller, leaving whatever state the callback had written.
///
/// `R` selects the raw lock. The default [`UnfairLock`] is the fast path;
/// any [`RawMutex`] (for example `parking_lot::RawMutex`) can be chosen
/// through [`with_lock`](Self::with_lock).
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use basekit_sync::SynchronizedCell;
///
/// let cache = SynchronizedCell::new(HashMap::new());
/// cache.mutate(|map| {
///     map.insert("key1", 1);
/// });
///
/// let has_key = cache.with(|map| map.contains_key("key1"));
/// assert!(has_key);
/// assert_eq!(cache.read().len(), 1);
/// ```
pub struct SynchronizedCell<T, R = UnfairLock> {
    inner: lock_api::Mutex<R, T>,
}

impl<T> SynchronizedCell<T> {
    /// Create a cell holding `value`, guarded by an [`UnfairLock`].
    pub fn new(value: T) -> Self {
        Self::with_lock(value)
    }
}

impl<T, R: RawMutex> SynchronizedCell<T, R> {
    /// Create a cell holding `value`, guarded by the raw lock `R`.
    ///
    /// ```
    /// use basekit_sync::SynchronizedCell;
    ///
    /// let cell = SynchronizedCell::<_, parking_lot::RawMutex>::with_lock(7);
    /// assert_eq!(cell.read(), 7);
    /// ```
    pub fn with_lock(value: T) -> Self {
        Self {
            inner: lock_api::Mutex::new(value),
        }
    }

    /// Copy out the current value.
    pub fn read(&self) -> T
    where
        T: Clone,
    {
        T::clone(&self.inner.lock())
    }

    /// Replace the current value.
    ///
    /// The previous value is dropped after the lock is released.
    pub fn write(&self, value: T) {
        let _previous = self.replace(value);
    }

    /// Replace the current value and return the previous one.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.inner.lock(), value)
    }

    /// Transform the value in place.
    ///
    /// No other operation on this cell can run while `f` does.
    pub fn mutate(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.lock());
    }

    /// Transform the value in place with a callback that can fail.
    ///
    /// The lock is released before the error is handed back.
    pub fn try_mutate<U, E>(&self, f: impl FnOnce(&mut T) -> Result<U, E>) -> Result<U, E> {
        f(&mut self.inner.lock())
    }

    /// Compute a result from the current value under a single acquisition.
    ///
    /// Useful for compound reads such as "look up a key and compare it"
    /// that must not observe an intervening write.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&self.inner.lock())
    }

    /// Like [`with`](Self::with), but gives up instead of waiting when the
    /// lock is held elsewhere.
    pub fn try_with<U>(&self, f: impl FnOnce(&T) -> U) -> Option<U> {
        match self.inner.try_lock() {
            Some(guard) => Some(f(&guard)),
            None => {
                tracing::trace!("synchronized cell busy, try_with refused");
                None
            }
        }
    }

    /// Whether some thread is inside an operation on this cell right now.
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Direct access through an exclusive borrow, which already rules out
    /// concurrent callers.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Default, R: RawMutex> Default for SynchronizedCell<T, R> {
    fn default() -> Self {
        Self::with_lock(T::default())
    }
}

impl<T, R: RawMutex> From<T> for SynchronizedCell<T, R> {
    fn from(value: T) -> Self {
        Self::with_lock(value)
    }
}

impl<T: fmt::Debug, R: RawMutex> fmt::Debug for SynchronizedCell<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("SynchronizedCell");
        match self.inner.try_lock() {
            Some(guard) => out.field("value", &&*guard),
            None => out.field("value", &format_args!("<locked>")),
        };
        out.finish()
    }
}
