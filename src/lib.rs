// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// C-RW-WP: a scalable reader-writer spin lock for read-mostly in-memory data.
// Readers register on split ingress/egress counters instead of one shared
// word; writers take a CAS flag and drain the readers; starved readers raise
// a barrier that holds back new writers.

mod sync;

pub mod config;
pub use config::{
    expected_workers, set_expected_workers, DEFAULT_READER_PATIENCE, MAX_READER_PATIENCE,
};

mod error;
pub use error::{Busy, BusyReason, TryLockResult};

mod read_indicator;
mod writer;

mod rw_lock;
pub use rw_lock::{LockMode, LockState, RawRwLock};

#[cfg(not(loom))]
mod guard;
#[cfg(not(loom))]
pub use guard::{try_upgrade, RwLock, RwLockReadGuard, RwLockWriteGuard};
