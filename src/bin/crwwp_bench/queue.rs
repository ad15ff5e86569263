// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Queue workload: writes enqueue at the tail, reads dequeue from the head.
// The queue starts with `ops * threads` elements so reads rarely find it empty.

use std::collections::VecDeque;
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use crossbeam_queue::SegQueue;

use crate::round::Scenario;

fn prefilled(len: usize) -> VecDeque<u64> {
    (0..len as u64).collect()
}

pub struct MutexQueue {
    queue: Mutex<VecDeque<u64>>,
}

impl MutexQueue {
    pub fn new(len: usize) -> Self {
        Self {
            queue: Mutex::new(prefilled(len)),
        }
    }
}

impl Scenario for MutexQueue {
    fn name(&self) -> &'static str {
        "mutex"
    }

    fn write(&self, i: u64) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(i);
    }

    fn read(&self) {
        let item = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        black_box(item);
    }
}

/// Peek under the read lock, pop under the write lock.
pub struct StdRwLockQueue {
    queue: RwLock<VecDeque<u64>>,
}

impl StdRwLockQueue {
    pub fn new(len: usize) -> Self {
        Self {
            queue: RwLock::new(prefilled(len)),
        }
    }
}

impl Scenario for StdRwLockQueue {
    fn name(&self) -> &'static str {
        "rwlock"
    }

    fn write(&self, i: u64) {
        self.queue
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(i);
    }

    fn read(&self) {
        let empty = self
            .queue
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty();
        if empty {
            return;
        }
        let item = self
            .queue
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        black_box(item);
    }
}

/// Peek under the read lock, then upgrade in place; fall back to a fresh
/// write lock when the upgrade is busy.
pub struct CrwwpQueue {
    queue: crwwp::RwLock<VecDeque<u64>>,
    popped: AtomicU64,
}

impl CrwwpQueue {
    pub fn new(len: usize) -> Self {
        Self {
            queue: crwwp::RwLock::new(prefilled(len)),
            popped: AtomicU64::new(0),
        }
    }
}

impl Scenario for CrwwpQueue {
    fn name(&self) -> &'static str {
        "c-rw-wp"
    }

    fn write(&self, i: u64) {
        self.queue.write().push_back(i);
    }

    fn read(&self) {
        let guard = self.queue.read();
        if guard.is_empty() {
            return;
        }
        let mut guard = match crwwp::try_upgrade(guard) {
            Ok(w) => w,
            Err(r) => {
                drop(r);
                self.queue.write()
            }
        };
        if let Some(item) = guard.pop_front() {
            self.popped.fetch_add(1, Ordering::Relaxed);
            black_box(item);
        }
    }

    fn finish(self) {
        let queue = self.queue.into_inner();
        log::debug!(
            "c-rw-wp queue finished with {} elements after {} pops",
            queue.len(),
            self.popped.into_inner()
        );
    }
}

/// Lock-free baseline.
pub struct LfQueue {
    queue: SegQueue<u64>,
}

impl LfQueue {
    pub fn new(len: usize) -> Self {
        let queue = SegQueue::new();
        for i in 0..len as u64 {
            queue.push(i);
        }
        Self { queue }
    }
}

impl Scenario for LfQueue {
    fn name(&self) -> &'static str {
        "lfqueue"
    }

    fn write(&self, i: u64) {
        self.queue.push(i);
    }

    fn read(&self) {
        black_box(self.queue.pop());
    }
}
