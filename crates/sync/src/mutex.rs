use std::fmt;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

/// Whether a [`Mutex`] may be re-acquired by the thread holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MutexKind {
    /// Re-acquiring from the owning thread deadlocks.
    #[default]
    Normal,
    /// The owning thread may acquire again; the lock is released when the
    /// outermost guard is dropped.
    Recursive,
}

/// A standalone exclusive lock.
///
/// Unlike [`SynchronizedCell`](crate::SynchronizedCell) this lock owns no
/// data: it brackets whatever critical section the caller chooses. Access is
/// released when the returned [`MutexGuard`] is dropped.
///
/// # Examples
///
/// ```
/// use basekit_sync::Mutex;
///
/// let mutex = Mutex::new();
/// {
///     let _guard = mutex.lock();
///     assert!(mutex.try_lock().is_none());
/// }
/// assert!(mutex.try_lock().is_some());
///
/// let recursive = Mutex::recursive();
/// let outer = recursive.lock();
/// let inner = recursive.lock();
/// drop(inner);
/// drop(outer);
/// ```
pub struct Mutex {
    inner: Inner,
}

enum Inner {
    Normal(parking_lot::Mutex<()>),
    Recursive(ReentrantMutex<()>),
}

/// Proof that a [`Mutex`] is held. Dropping it releases the lock.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct MutexGuard<'a> {
    _inner: GuardInner<'a>,
}

// Fields are held only so their drop releases the lock.
#[allow(dead_code)]
enum GuardInner<'a> {
    Normal(parking_lot::MutexGuard<'a, ()>),
    Recursive(ReentrantMutexGuard<'a, ()>),
}

impl Mutex {
    /// Create a non-recursive lock.
    pub fn new() -> Self {
        Self::with_kind(MutexKind::Normal)
    }

    /// Create a recursive lock.
    pub fn recursive() -> Self {
        Self::with_kind(MutexKind::Recursive)
    }

    pub fn with_kind(kind: MutexKind) -> Self {
        let inner = match kind {
            MutexKind::Normal => Inner::Normal(parking_lot::Mutex::new(())),
            MutexKind::Recursive => Inner::Recursive(ReentrantMutex::new(())),
        };
        Self { inner }
    }

    pub fn kind(&self) -> MutexKind {
        match self.inner {
            Inner::Normal(_) => MutexKind::Normal,
            Inner::Recursive(_) => MutexKind::Recursive,
        }
    }

    pub fn is_recursive(&self) -> bool {
        self.kind() == MutexKind::Recursive
    }

    /// Block until the lock is acquired.
    pub fn lock(&self) -> MutexGuard<'_> {
        let inner = match &self.inner {
            Inner::Normal(mutex) => GuardInner::Normal(mutex.lock()),
            Inner::Recursive(mutex) => GuardInner::Recursive(mutex.lock()),
        };
        MutexGuard { _inner: inner }
    }

    /// Acquire the lock only if that does not require waiting.
    pub fn try_lock(&self) -> Option<MutexGuard<'_>> {
        let inner = match &self.inner {
            Inner::Normal(mutex) => mutex.try_lock().map(GuardInner::Normal),
            Inner::Recursive(mutex) => mutex.try_lock().map(GuardInner::Recursive),
        };
        if inner.is_none() {
            tracing::trace!(kind = ?self.kind(), "mutex try_lock refused");
        }
        inner.map(|inner| MutexGuard { _inner: inner })
    }

    /// Whether any thread currently holds the lock.
    pub fn is_locked(&self) -> bool {
        match &self.inner {
            Inner::Normal(mutex) => mutex.is_locked(),
            Inner::Recursive(mutex) => mutex.is_locked(),
        }
    }

    /// Run `f` with the lock held, releasing it when `f` returns or unwinds.
    pub fn sync<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock();
        f()
    }
}

impl Default for Mutex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex")
            .field("kind", &self.kind())
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl MutexGuard<'_> {
    /// Release the lock. Equivalent to dropping the guard.
    pub fn unlock(self) {}
}

impl fmt::Debug for MutexGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MutexGuard")
    }
}
