// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// C-RW-WP reader-writer lock (Calciu et al., "NUMA-Aware Reader-Writer Locks").
// - Readers register on an ingress/egress read indicator and back off while a
//   writer holds the flag.
// - Writers take a CAS flag, then wait for already-registered readers to drain.
// - A reader that spins past its patience raises a barrier that keeps new
//   writers from starting, so a stream of writers cannot starve it.

use std::fmt;

use crate::config::ran_out_of_patience;
use crate::error::{Busy, BusyReason, TryLockResult};
use crate::read_indicator::ReadIndicator;
use crate::sync::pause;
use crate::writer::{WriterBarrier, WriterLock};

/// Which side of the lock an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockMode {
    Read,
    Write,
}

/// Point-in-time view of a lock's four fields.
///
/// Fields are loaded one after another, so under concurrent use the snapshot
/// may mix values from different instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockState {
    pub readers_ingress: u32,
    pub readers_egress: u32,
    pub writers_barrier: i32,
    pub writer_locked: bool,
}

impl LockState {
    /// Readers currently registered.
    pub fn active_readers(&self) -> u32 {
        self.readers_ingress.wrapping_sub(self.readers_egress)
    }

    /// No reader registered, no writer, barrier down.
    pub fn is_idle(&self) -> bool {
        self.active_readers() == 0 && !self.writer_locked && self.writers_barrier == 0
    }
}

/// A scalable reader-writer spin lock.
///
/// Readers only touch the two indicator counters and read the writer flag, so
/// read-mostly workloads do not bounce a single cache line between cores.
/// Each of the four fields sits on its own cache line.
///
/// The lock guards no data by itself; pair it with the data through
/// [`crate::RwLock`] or keep the discipline by hand. Every successful
/// acquisition must be matched by exactly one release. Acquisition is not
/// recursive. All waiting is spinning: there is no timeout and no parking.
///
/// Dropping the lock (or calling [`destroy`](Self::destroy)) while it is held
/// panics.
pub struct RawRwLock {
    readers: ReadIndicator,
    barrier: WriterBarrier,
    writer: WriterLock,
}

impl RawRwLock {
    /// Create a new unlocked lock.
    #[cfg(not(loom))]
    pub const fn new() -> Self {
        Self {
            readers: ReadIndicator::new(),
            barrier: WriterBarrier::new(),
            writer: WriterLock::new(),
        }
    }

    #[cfg(loom)]
    pub fn new() -> Self {
        Self {
            readers: ReadIndicator::new(),
            barrier: WriterBarrier::new(),
            writer: WriterLock::new(),
        }
    }

    /// Acquire a shared (read) lock, spinning while a writer holds the lock.
    ///
    /// After [`MAX_READER_PATIENCE`](crate::MAX_READER_PATIENCE) spins this
    /// reader raises the writer barrier once and keeps it raised until it gets
    /// in. The writer that currently holds the lock still finishes first.
    pub fn read_lock(&self) {
        let mut spins = 0u32;
        let mut barrier_raised = false;

        loop {
            self.readers.arrive();
            if !self.writer.is_locked() {
                break;
            }

            // a writer is in; undo the arrival so its drain can finish
            self.readers.depart();

            while self.writer.is_locked() {
                pause();
                if ran_out_of_patience(spins) && !barrier_raised {
                    log::trace!("reader out of patience after {spins} spins, raising writer barrier");
                    self.barrier.raise();
                    barrier_raised = true;
                }
                spins = spins.saturating_add(1);
            }
        }

        if barrier_raised {
            self.barrier.lower();
            log::trace!("reader acquired, writer barrier lowered");
        }
    }

    /// Acquire a shared lock only if no writer holds it right now.
    pub fn try_read_lock(&self) -> TryLockResult {
        self.readers.arrive();
        if self.writer.is_locked() {
            self.readers.depart();
            return Err(Busy::new(BusyReason::WriterActive));
        }
        Ok(())
    }

    /// Release a shared lock.
    pub fn read_unlock(&self) {
        self.readers.depart();
    }

    /// Acquire the exclusive (write) lock.
    ///
    /// Waits for the writer barrier to drop, takes the writer flag, then waits
    /// for readers that registered before the flag was set to leave. Readers
    /// arriving after that see the flag and step back, so the drain ends once
    /// the in-flight readers do.
    pub fn write_lock(&self) {
        self.barrier.wait_until_lowered();

        while !self.writer.try_acquire_weak() {
            pause();
        }

        self.readers.wait_until_empty();
    }

    /// Acquire the exclusive lock only if that needs no waiting.
    pub fn try_write_lock(&self) -> TryLockResult {
        if self.barrier.is_raised() {
            return Err(Busy::new(BusyReason::WriterBarrier));
        }
        if !self.writer.try_acquire() {
            return Err(Busy::new(BusyReason::WriterActive));
        }
        if !self.readers.is_empty() {
            self.writer.release();
            return Err(Busy::new(BusyReason::ReadersActive));
        }
        Ok(())
    }

    /// Release the exclusive lock.
    ///
    /// # Panics
    /// If the lock is not write-locked.
    pub fn write_unlock(&self) {
        self.writer.release();
    }

    /// Turn the caller's read lock into the write lock without waiting.
    ///
    /// Succeeds only when the caller is the sole reader. On `Err` the caller
    /// still holds exactly its read lock; on `Ok` it holds the write lock and
    /// no read registration.
    pub fn try_upgrade(&self) -> TryLockResult {
        if self.barrier.is_raised() {
            return Err(Busy::new(BusyReason::WriterBarrier));
        }
        if !self.writer.try_acquire() {
            return Err(Busy::new(BusyReason::WriterActive));
        }

        self.readers.depart();

        if !self.readers.is_empty() {
            // other readers are in: take our registration back, then let go of
            // the flag
            self.readers.arrive();
            self.writer.release();
            return Err(Busy::new(BusyReason::ReadersActive));
        }
        Ok(())
    }

    /// Turn the caller's write lock into a read lock.
    ///
    /// The read registration is made before the writer flag is dropped, so no
    /// other writer can get in between.
    ///
    /// # Panics
    /// If the lock is not write-locked.
    pub fn downgrade(&self) {
        self.readers.arrive();
        self.writer.release();
    }

    /// Blocking acquisition in the given mode.
    pub fn lock(&self, mode: LockMode) {
        match mode {
            LockMode::Read => self.read_lock(),
            LockMode::Write => self.write_lock(),
        }
    }

    /// Non-blocking acquisition in the given mode.
    pub fn try_lock(&self, mode: LockMode) -> TryLockResult {
        match mode {
            LockMode::Read => self.try_read_lock(),
            LockMode::Write => self.try_write_lock(),
        }
    }

    /// Release a lock held in the given mode.
    pub fn unlock(&self, mode: LockMode) {
        match mode {
            LockMode::Read => self.read_unlock(),
            LockMode::Write => self.write_unlock(),
        }
    }

    /// `true` while a writer holds the flag (it may still be draining readers).
    pub fn is_write_locked(&self) -> bool {
        self.writer.is_locked()
    }

    /// `true` while at least one starved reader asks writers to wait.
    pub fn is_barrier_raised(&self) -> bool {
        self.barrier.is_raised()
    }

    /// Snapshot of the lock's fields.
    pub fn state(&self) -> LockState {
        LockState {
            readers_ingress: self.readers.ingress(),
            readers_egress: self.readers.egress(),
            writers_barrier: self.barrier.count(),
            writer_locked: self.writer.is_locked(),
        }
    }

    /// Tear the lock down, checking that nobody holds it.
    ///
    /// # Panics
    /// If the lock is write-locked or any reader is still registered.
    pub fn destroy(self) {
        drop(self);
    }

    fn check_released(&self) {
        let unlocked = !self.writer.is_locked();
        assert!(unlocked, "c-rw-wp: lock destroyed while write-locked");
        let empty = self.readers.is_empty();
        assert!(empty, "c-rw-wp: lock destroyed with registered readers");
    }
}

impl Default for RawRwLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RawRwLock {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        self.check_released();
        log::debug!("c-rw-wp lock destroyed");
    }
}

impl fmt::Debug for RawRwLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.state();
        f.debug_struct("RawRwLock")
            .field("readers_ingress", &s.readers_ingress)
            .field("readers_egress", &s.readers_egress)
            .field("writers_barrier", &s.writers_barrier)
            .field("writer_locked", &s.writer_locked)
            .finish()
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn new_lock_is_idle() {
        let lock = RawRwLock::new();
        assert!(lock.state().is_idle());
        assert!(!lock.is_write_locked());
        assert!(!lock.is_barrier_raised());
    }

    #[test]
    fn read_lock_counts() {
        let lock = RawRwLock::new();
        lock.read_lock();
        lock.read_lock();
        let s = lock.state();
        assert_eq!(s.active_readers(), 2);
        assert_eq!(s.readers_ingress, 2);
        lock.read_unlock();
        lock.read_unlock();
        assert!(lock.state().is_idle());
    }

    #[test]
    fn try_read_while_write_locked_undoes_arrival() {
        let lock = RawRwLock::new();
        lock.write_lock();
        let err = lock.try_read_lock().unwrap_err();
        assert_eq!(err.reason(), BusyReason::WriterActive);
        let s = lock.state();
        assert_eq!(s.active_readers(), 0);
        assert_eq!(s.readers_ingress, 1);
        assert_eq!(s.readers_egress, 1);
        lock.write_unlock();
    }

    #[test]
    fn try_write_reports_readers() {
        let lock = RawRwLock::new();
        lock.read_lock();
        let err = lock.try_write_lock().unwrap_err();
        assert_eq!(err.reason(), BusyReason::ReadersActive);
        // the flag taken during the attempt was given back
        assert!(!lock.is_write_locked());
        lock.read_unlock();
        lock.try_write_lock().unwrap();
        lock.write_unlock();
    }

    #[test]
    fn try_write_blocked_by_barrier() {
        let lock = RawRwLock::new();
        lock.barrier.raise();
        let err = lock.try_write_lock().unwrap_err();
        assert_eq!(err.reason(), BusyReason::WriterBarrier);
        lock.read_lock();
        let err = lock.try_upgrade().unwrap_err();
        assert_eq!(err.reason(), BusyReason::WriterBarrier);
        lock.read_unlock();
        lock.barrier.lower();
        lock.try_write_lock().unwrap();
        lock.write_unlock();
    }

    #[test]
    fn upgrade_then_downgrade() {
        let lock = RawRwLock::new();
        lock.read_lock();
        lock.try_upgrade().unwrap();
        let s = lock.state();
        assert!(s.writer_locked);
        assert_eq!(s.active_readers(), 0);

        lock.downgrade();
        let s = lock.state();
        assert!(!s.writer_locked);
        assert_eq!(s.active_readers(), 1);
        lock.read_unlock();
    }

    #[test]
    fn failed_upgrade_keeps_read_registration() {
        let lock = RawRwLock::new();
        lock.read_lock();
        lock.read_lock();
        let err = lock.try_upgrade().unwrap_err();
        assert_eq!(err.reason(), BusyReason::ReadersActive);
        let s = lock.state();
        assert!(!s.writer_locked);
        assert_eq!(s.active_readers(), 2);
        lock.read_unlock();
        lock.read_unlock();
    }

    #[test]
    fn upgrade_while_write_locked_is_busy() {
        let lock = RawRwLock::new();
        // reader registered, writer flag held by someone else
        lock.readers.arrive();
        assert!(lock.writer.try_acquire());
        let err = lock.try_upgrade().unwrap_err();
        assert_eq!(err.reason(), BusyReason::WriterActive);
        lock.writer.release();
        lock.readers.depart();
    }

    #[test]
    fn mode_dispatch() {
        let lock = RawRwLock::new();
        lock.lock(LockMode::Read);
        assert!(lock.try_lock(LockMode::Write).is_err());
        lock.unlock(LockMode::Read);
        lock.lock(LockMode::Write);
        assert!(lock.try_lock(LockMode::Read).is_err());
        lock.unlock(LockMode::Write);
        lock.try_lock(LockMode::Read).unwrap();
        lock.unlock(LockMode::Read);
    }

    #[test]
    #[should_panic(expected = "not write-locked")]
    fn write_unlock_without_lock_is_fatal() {
        let lock = RawRwLock::new();
        lock.write_unlock();
    }

    #[test]
    #[should_panic(expected = "destroyed while write-locked")]
    fn destroy_while_write_locked_is_fatal() {
        let lock = RawRwLock::new();
        lock.write_lock();
        lock.destroy();
    }

    #[test]
    #[should_panic(expected = "destroyed with registered readers")]
    fn destroy_with_reader_is_fatal() {
        let lock = RawRwLock::new();
        lock.read_lock();
        lock.destroy();
    }

    #[test]
    fn debug_shows_fields() {
        let lock = RawRwLock::new();
        lock.read_lock();
        let dbg = format!("{lock:?}");
        assert!(dbg.contains("readers_ingress: 1"));
        assert!(dbg.contains("writer_locked: false"));
        lock.read_unlock();
    }
}
