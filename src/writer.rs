// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Writer-side state: the exclusive writer flag and the barrier that starved
// readers raise to hold back writers that have not yet acquired.

use crossbeam_utils::CachePadded;

use crate::sync::{AtomicBool, AtomicI32, Ordering};

const UNLOCKED: bool = false;
const LOCKED: bool = true;

/// Exclusive writer flag, acquired by compare-and-swap.
pub(crate) struct WriterLock {
    flag: CachePadded<AtomicBool>,
}

impl WriterLock {
    #[cfg(not(loom))]
    pub(crate) const fn new() -> Self {
        Self {
            flag: CachePadded::new(AtomicBool::new(UNLOCKED)),
        }
    }

    #[cfg(loom)]
    pub(crate) fn new() -> Self {
        Self {
            flag: CachePadded::new(AtomicBool::new(UNLOCKED)),
        }
    }

    /// Single CAS attempt; never fails spuriously.
    #[inline]
    pub(crate) fn try_acquire(&self) -> bool {
        self.flag
            .compare_exchange(UNLOCKED, LOCKED, Ordering::SeqCst, Ordering::Relaxed)
            .is_ok()
    }

    /// CAS attempt for retry loops; may fail spuriously.
    #[inline]
    pub(crate) fn try_acquire_weak(&self) -> bool {
        self.flag
            .compare_exchange_weak(UNLOCKED, LOCKED, Ordering::SeqCst, Ordering::Relaxed)
            .is_ok()
    }

    /// Drop exclusivity.
    ///
    /// # Panics
    /// If the flag was not locked (double unlock or unlock without lock).
    #[inline]
    pub(crate) fn release(&self) {
        let done = self
            .flag
            .compare_exchange(LOCKED, UNLOCKED, Ordering::Release, Ordering::Relaxed)
            .is_ok();
        assert!(done, "c-rw-wp: write unlock of a lock that is not write-locked");
    }

    #[inline]
    pub(crate) fn is_locked(&self) -> bool {
        self.flag.load(Ordering::SeqCst) == LOCKED
    }
}

/// Count of readers currently asking writers to stand aside.
///
/// Each starved reader raises it once and lowers it once, so it is a counter
/// rather than a flag.
pub(crate) struct WriterBarrier {
    raised: CachePadded<AtomicI32>,
}

impl WriterBarrier {
    #[cfg(not(loom))]
    pub(crate) const fn new() -> Self {
        Self {
            raised: CachePadded::new(AtomicI32::new(0)),
        }
    }

    #[cfg(loom)]
    pub(crate) fn new() -> Self {
        Self {
            raised: CachePadded::new(AtomicI32::new(0)),
        }
    }

    #[inline]
    pub(crate) fn raise(&self) {
        self.raised.fetch_add(1, Ordering::Release);
    }

    #[inline]
    pub(crate) fn lower(&self) {
        let prev = self.raised.fetch_sub(1, Ordering::Release);
        debug_assert!(prev > 0, "c-rw-wp: writer barrier lowered below zero");
    }

    #[inline]
    pub(crate) fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire) > 0
    }

    /// Spin while any starved reader holds the barrier up.
    pub(crate) fn wait_until_lowered(&self) {
        while self.is_raised() {
            crate::sync::pause();
        }
    }

    pub(crate) fn count(&self) -> i32 {
        self.raised.load(Ordering::Acquire)
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn writer_lock_cas() {
        let w = WriterLock::new();
        assert!(!w.is_locked());
        assert!(w.try_acquire());
        assert!(w.is_locked());
        assert!(!w.try_acquire());
        w.release();
        assert!(!w.is_locked());
        while !w.try_acquire_weak() {}
        w.release();
    }

    #[test]
    #[should_panic(expected = "not write-locked")]
    fn double_release_is_fatal() {
        let w = WriterLock::new();
        assert!(w.try_acquire());
        w.release();
        w.release();
    }

    #[test]
    fn barrier_counts_raises() {
        let b = WriterBarrier::new();
        assert!(!b.is_raised());
        b.raise();
        b.raise();
        assert!(b.is_raised());
        assert_eq!(b.count(), 2);
        b.lower();
        assert!(b.is_raised());
        b.lower();
        assert!(!b.is_raised());
        b.wait_until_lowered();
    }
}
