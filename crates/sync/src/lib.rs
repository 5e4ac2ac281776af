//! basekit-sync - exclusive locks and a lock-guarded value cell
//!
//! This crate provides:
//! - [`Mutex`]: a standalone lock, optionally recursive, for bracketing a
//!   critical section that is not tied to one value.
//! - [`UnfairLock`]: the fast-path, owner-tracking raw lock that backs
//!   [`SynchronizedCell`] by default.
//! - [`SynchronizedCell`]: a value that can only be read, replaced or
//!   transformed while holding its lock.
//!
//! # Example
//!
//! ```
//! use std::thread;
//! use basekit_sync::SynchronizedCell;
//!
//! let counter = SynchronizedCell::new(0u32);
//!
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..100 {
//!                 counter.mutate(|n| *n += 1);
//!             }
//!         });
//!     }
//! });
//!
//! assert_eq!(counter.read(), 400);
//! ```

pub mod cell;
pub mod mutex;
pub mod unfair_lock;

// Re-exports for convenience
pub use cell::SynchronizedCell;
pub use mutex::{Mutex, MutexGuard, MutexKind};
pub use unfair_lock::UnfairLock;

/// The `lock_api` traits implemented by [`UnfairLock`], re-exported so callers
/// can name other raw locks for [`SynchronizedCell`].
pub use parking_lot::lock_api::RawMutex;
