// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Tuning knobs: the reader patience threshold (fixed at build time) and the
// process-wide expected worker count.

use std::sync::atomic::{AtomicU16, Ordering};

/// Default number of spin iterations a blocked reader tolerates before it
/// raises the writer barrier.
pub const DEFAULT_READER_PATIENCE: u32 = 500;

/// Reader patience in effect for this build.
///
/// Set `CRWWP_READER_PATIENCE=<n>` in the environment of `cargo build` to
/// override [`DEFAULT_READER_PATIENCE`]. A value that is not a plain decimal
/// `u32` fails the build.
pub const MAX_READER_PATIENCE: u32 = match option_env!("CRWWP_READER_PATIENCE") {
    Some(v) => parse_patience(v),
    None => DEFAULT_READER_PATIENCE,
};

/// Default for [`expected_workers`].
pub const DEFAULT_EXPECTED_WORKERS: u16 = 128;

static EXPECTED_WORKERS: AtomicU16 = AtomicU16::new(DEFAULT_EXPECTED_WORKERS);

/// Record how many threads are expected to share locks in this process.
///
/// The value is shared by every lock instance. The acquire/release protocol
/// does not consult it; it is kept as a hook for scaling patience or backoff
/// with the amount of concurrency.
pub fn set_expected_workers(workers: u16) {
    let prev = EXPECTED_WORKERS.swap(workers, Ordering::Relaxed);
    log::debug!("expected workers: {prev} -> {workers}");
}

/// Current value set by [`set_expected_workers`].
pub fn expected_workers() -> u16 {
    EXPECTED_WORKERS.load(Ordering::Relaxed)
}

#[inline]
pub(crate) const fn ran_out_of_patience(spins: u32) -> bool {
    spins >= MAX_READER_PATIENCE
}

const fn parse_patience(s: &str) -> u32 {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "CRWWP_READER_PATIENCE is empty");
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        assert!(
            b.is_ascii_digit(),
            "CRWWP_READER_PATIENCE must be a decimal integer"
        );
        value = match value.checked_mul(10) {
            Some(v) => match v.checked_add((b - b'0') as u32) {
                Some(v) => v,
                None => panic!("CRWWP_READER_PATIENCE overflows u32"),
            },
            None => panic!("CRWWP_READER_PATIENCE overflows u32"),
        };
        i += 1;
    }
    value
}
