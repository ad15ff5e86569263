// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Ingress/egress read indicator.
// Readers bump `ingress` on arrival and `egress` on departure; the indicator is
// empty when both counters are equal. No per-reader state is kept.

use crossbeam_utils::CachePadded;

use crate::sync::{AtomicU32, Ordering};

/// Pair of monotonically increasing arrival/departure counters, each on its
/// own cache line so arriving and departing readers do not fight over one.
///
/// Both counters wrap at `u32::MAX`; emptiness is plain equality, which stays
/// correct across the wrap as long as fewer than 2^32 readers are registered
/// at once.
pub(crate) struct ReadIndicator {
    ingress: CachePadded<AtomicU32>,
    egress: CachePadded<AtomicU32>,
}

impl ReadIndicator {
    #[cfg(not(loom))]
    pub(crate) const fn new() -> Self {
        Self {
            ingress: CachePadded::new(AtomicU32::new(0)),
            egress: CachePadded::new(AtomicU32::new(0)),
        }
    }

    #[cfg(loom)]
    pub(crate) fn new() -> Self {
        Self {
            ingress: CachePadded::new(AtomicU32::new(0)),
            egress: CachePadded::new(AtomicU32::new(0)),
        }
    }

    /// Register one reader.
    ///
    /// SeqCst: a reader publishes its arrival and then checks the writer flag,
    /// while a writer publishes the flag and then checks this counter. Both
    /// stores must be ordered before the other side's load.
    #[inline]
    pub(crate) fn arrive(&self) {
        self.ingress.fetch_add(1, Ordering::SeqCst);
    }

    /// Unregister one reader. Publishes everything the reader did while
    /// registered to the writer that later observes the indicator empty.
    #[inline]
    pub(crate) fn depart(&self) {
        self.egress.fetch_add(1, Ordering::Release);
    }

    /// `true` when no reader is registered.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        // egress first: it never overtakes ingress, so equality here means
        // there was an instant with no reader registered.
        let egress = self.egress.load(Ordering::SeqCst);
        let ingress = self.ingress.load(Ordering::SeqCst);
        egress == ingress
    }

    /// Spin until every registered reader has departed.
    pub(crate) fn wait_until_empty(&self) {
        while !self.is_empty() {
            crate::sync::pause();
        }
    }

    pub(crate) fn ingress(&self) -> u32 {
        self.ingress.load(Ordering::Acquire)
    }

    pub(crate) fn egress(&self) -> u32 {
        self.egress.load(Ordering::Acquire)
    }
}
