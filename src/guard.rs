// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Data-carrying lock built on lock_api: the raw C-RW-WP lock plus RAII guards
// that release on drop.

use lock_api::GuardSend;

use crate::rw_lock::RawRwLock;

/// A C-RW-WP reader-writer lock protecting a `T`.
pub type RwLock<T> = lock_api::RwLock<RawRwLock, T>;
/// Shared access to the data in a [`RwLock`].
pub type RwLockReadGuard<'a, T> = lock_api::RwLockReadGuard<'a, RawRwLock, T>;
/// Exclusive access to the data in a [`RwLock`].
pub type RwLockWriteGuard<'a, T> = lock_api::RwLockWriteGuard<'a, RawRwLock, T>;

unsafe impl lock_api::RawRwLock for RawRwLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawRwLock::new();

    type GuardMarker = GuardSend;

    fn lock_shared(&self) {
        self.read_lock();
    }

    fn try_lock_shared(&self) -> bool {
        self.try_read_lock().is_ok()
    }

    unsafe fn unlock_shared(&self) {
        self.read_unlock();
    }

    fn lock_exclusive(&self) {
        self.write_lock();
    }

    fn try_lock_exclusive(&self) -> bool {
        self.try_write_lock().is_ok()
    }

    unsafe fn unlock_exclusive(&self) {
        self.write_unlock();
    }

    fn is_locked(&self) -> bool {
        let s = self.state();
        s.writer_locked || s.active_readers() > 0
    }

    fn is_locked_exclusive(&self) -> bool {
        self.is_write_locked()
    }
}

unsafe impl lock_api::RawRwLockDowngrade for RawRwLock {
    unsafe fn downgrade(&self) {
        RawRwLock::downgrade(self);
    }
}

/// Try to turn a read guard into a write guard without waiting.
///
/// Succeeds only when `guard` is the sole reader and no starved reader has
/// raised the writer barrier. On failure the untouched read guard is handed
/// back.
pub fn try_upgrade<'a, T: ?Sized>(
    guard: RwLockReadGuard<'a, T>,
) -> Result<RwLockWriteGuard<'a, T>, RwLockReadGuard<'a, T>> {
    let lock = RwLockReadGuard::rwlock(&guard);
    // Safety: `guard` proves this thread holds a read registration on `lock`.
    if unsafe { lock.raw() }.try_upgrade().is_err() {
        return Err(guard);
    }
    // The read registration was consumed by the upgrade; the write guard now
    // owns the release.
    std::mem::forget(guard);
    // Safety: the upgrade succeeded, so this thread holds the write lock.
    Ok(unsafe { lock.make_write_guard_unchecked() })
}
