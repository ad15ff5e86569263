// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Atomics and the spin hint used by every waiting loop in the crate.
// Under `--cfg loom` the atomics and the hint come from loom so the lock
// protocol can be model-checked.

#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

/// One iteration of a spin-wait.
///
/// Architectures with a dedicated low-power spin instruction get it through
/// `spin_loop()`; everything else yields the time slice back to the scheduler.
#[cfg(all(
    not(loom),
    any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "riscv32",
        target_arch = "riscv64",
        target_arch = "powerpc",
        target_arch = "powerpc64",
    )
))]
#[inline]
pub(crate) fn pause() {
    std::hint::spin_loop();
}

#[cfg(all(
    not(loom),
    not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "riscv32",
        target_arch = "riscv64",
        target_arch = "powerpc",
        target_arch = "powerpc64",
    ))
))]
#[inline]
pub(crate) fn pause() {
    std::thread::yield_now();
}

#[cfg(loom)]
#[inline]
pub(crate) fn pause() {
    loom::thread::yield_now();
}
