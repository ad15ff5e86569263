// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Outcome of the non-blocking lock operations.

use std::error::Error;
use std::fmt;

/// Why a non-blocking operation could not take the lock right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyReason {
    /// A reader ran out of patience and asked writers to stand aside.
    WriterBarrier,
    /// Another thread holds the write lock.
    WriterActive,
    /// Readers are still registered.
    ReadersActive,
}

/// The lock could not be acquired immediately.
///
/// Returned by `try_read_lock`, `try_write_lock` and `try_upgrade`. Nothing
/// changed on the lock's behalf: the caller holds exactly what it held before
/// the call and may retry with whatever backoff policy it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Busy {
    reason: BusyReason,
}

impl Busy {
    pub(crate) const fn new(reason: BusyReason) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> BusyReason {
        self.reason
    }
}

impl fmt::Display for Busy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let why = match self.reason {
            BusyReason::WriterBarrier => "writer barrier is raised",
            BusyReason::WriterActive => "write lock is held",
            BusyReason::ReadersActive => "readers are active",
        };
        write!(f, "lock busy: {why}")
    }
}

impl Error for Busy {}

/// Result of a non-blocking acquisition.
pub type TryLockResult = Result<(), Busy>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_reason() {
        let e = Busy::new(BusyReason::WriterBarrier);
        assert_eq!(e.to_string(), "lock busy: writer barrier is raised");
        assert_eq!(e.reason(), BusyReason::WriterBarrier);
        assert_eq!(
            Busy::new(BusyReason::ReadersActive).to_string(),
            "lock busy: readers are active"
        );
    }
}
