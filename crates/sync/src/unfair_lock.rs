use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::lock_api::{GetThreadId, GuardNoSend, RawMutex};
use parking_lot::RawThreadId;

/// Sentinel stored in `owner` while nobody holds the lock.
const NO_OWNER: usize = 0;

/// A non-recursive exclusive lock that makes no fairness promise.
///
/// An uncontended acquire is a single compare-and-swap; contended waiters
/// park instead of spinning. A thread that releases and immediately
/// re-acquires may win against threads that were already waiting.
///
/// The lock remembers which thread holds it, which makes
/// [`assert_owner`](UnfairLock::assert_owner) possible and turns a
/// recursive acquire into an immediate panic instead of a silent deadlock.
///
/// `UnfairLock` implements [`RawMutex`], so it can back any
/// `lock_api::Mutex`. It is the default lock of
/// [`SynchronizedCell`](crate::SynchronizedCell).
///
/// # Examples
///
/// ```
/// use basekit_sync::UnfairLock;
///
/// let lock = UnfairLock::new();
/// let answer = lock.sync(|| {
///     lock.assert_owner();
///     42
/// });
/// assert_eq!(answer, 42);
/// lock.assert_not_owner();
/// ```
pub struct UnfairLock {
    raw: parking_lot::RawMutex,
    owner: AtomicUsize,
}

impl UnfairLock {
    /// Create an unlocked lock.
    pub const fn new() -> Self {
        <Self as RawMutex>::INIT
    }

    /// Run `f` with the lock held.
    ///
    /// The lock is released when `f` returns or unwinds.
    pub fn sync<R>(&self, f: impl FnOnce() -> R) -> R {
        RawMutex::lock(self);
        let _release = Release(self);
        f()
    }

    /// Whether the calling thread currently holds the lock.
    pub fn is_owned_by_current_thread(&self) -> bool {
        self.owner.load(Ordering::Relaxed) == current_thread_id()
    }

    /// Panic unless the calling thread holds the lock.
    #[track_caller]
    pub fn assert_owner(&self) {
        assert!(
            self.is_owned_by_current_thread(),
            "UnfairLock is not held by the current thread"
        );
    }

    /// Panic if the calling thread holds the lock.
    #[track_caller]
    pub fn assert_not_owner(&self) {
        assert!(
            !self.is_owned_by_current_thread(),
            "UnfairLock is unexpectedly held by the current thread"
        );
    }

    fn claim(&self) {
        self.owner.store(current_thread_id(), Ordering::Relaxed);
    }
}

impl Default for UnfairLock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UnfairLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnfairLock")
            .field("locked", &RawMutex::is_locked(self))
            .finish()
    }
}

// SAFETY: exclusion is delegated to `parking_lot::RawMutex`; `owner` is only
// written by the thread that currently holds `raw`.
unsafe impl RawMutex for UnfairLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = UnfairLock {
        raw: <parking_lot::RawMutex as RawMutex>::INIT,
        owner: AtomicUsize::new(NO_OWNER),
    };

    // Unlocking must happen on the thread that locked.
    type GuardMarker = GuardNoSend;

    fn lock(&self) {
        assert!(
            !self.is_owned_by_current_thread(),
            "UnfairLock is not recursive: already held by the current thread"
        );
        self.raw.lock();
        self.claim();
    }

    fn try_lock(&self) -> bool {
        if self.raw.try_lock() {
            self.claim();
            true
        } else {
            false
        }
    }

    unsafe fn unlock(&self) {
        debug_assert!(
            self.is_owned_by_current_thread(),
            "UnfairLock unlocked by a thread that does not hold it"
        );
        self.owner.store(NO_OWNER, Ordering::Relaxed);
        // SAFETY: the caller holds the lock, per this method's contract.
        unsafe { self.raw.unlock() };
    }

    fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }
}

/// Releases the lock on drop, including during unwinding.
struct Release<'a>(&'a UnfairLock);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        // SAFETY: only built by `sync` right after acquiring the lock on this thread.
        unsafe { RawMutex::unlock(self.0) };
    }
}

fn current_thread_id() -> usize {
    RawThreadId::INIT.nonzero_thread_id().get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::thread;

    #[test]
    fn test_lock_and_unlock() {
        let lock = UnfairLock::new();
        assert!(!RawMutex::is_locked(&lock));

        RawMutex::lock(&lock);
        assert!(RawMutex::is_locked(&lock));
        assert!(lock.is_owned_by_current_thread());

        unsafe { RawMutex::unlock(&lock) };
        assert!(!RawMutex::is_locked(&lock));
        assert!(!lock.is_owned_by_current_thread());
    }

    #[test]
    fn test_try_lock_fails_while_held_elsewhere() {
        let lock = UnfairLock::new();
        lock.sync(|| {
            thread::scope(|s| {
                let acquired = s.spawn(|| RawMutex::try_lock(&lock)).join().unwrap();
                assert!(!acquired);
            });
        });

        assert!(RawMutex::try_lock(&lock));
        unsafe { RawMutex::unlock(&lock) };
    }

    #[test]
    fn test_owner_is_per_thread() {
        let lock = UnfairLock::new();
        lock.sync(|| {
            lock.assert_owner();
            thread::scope(|s| {
                s.spawn(|| lock.assert_not_owner()).join().unwrap();
            });
        });
        lock.assert_not_owner();
    }

    #[test]
    fn test_sync_releases_on_panic() {
        let lock = UnfairLock::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            lock.sync(|| panic!("boom"));
        }));
        assert!(result.is_err());
        assert!(!RawMutex::is_locked(&lock));
        assert_eq!(lock.sync(|| 7), 7);
    }

    #[test]
    fn test_recursive_lock_panics() {
        let lock = UnfairLock::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            lock.sync(|| lock.sync(|| ()));
        }));
        assert!(result.is_err());
        // The outer acquisition was released while unwinding.
        assert!(!RawMutex::is_locked(&lock));
    }

    #[test]
    #[should_panic(expected = "not held by the current thread")]
    fn test_assert_owner_panics_when_unlocked() {
        UnfairLock::new().assert_owner();
    }
}
