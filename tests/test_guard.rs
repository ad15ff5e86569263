// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Data-carrying RwLock<T> built on the C-RW-WP raw lock.

#![cfg(not(loom))]

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;

use crwwp::{try_upgrade, RwLock, RwLockWriteGuard};

#[test]
fn guarded_counter() {
    let lock = Arc::new(RwLock::new(0u64));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                for i in 0..1000 {
                    if i % 4 == 0 {
                        *lock.write() += 1;
                    } else {
                        let v = *lock.read();
                        assert!(v <= 1000);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(*lock.read(), 1000);
}

#[test]
fn peek_then_upgrade_dequeue() {
    let total = 4000u64;
    let lock = Arc::new(RwLock::new((0..total).collect::<VecDeque<u64>>()));
    let taken = Arc::new(RwLock::new(Vec::new()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let taken = Arc::clone(&taken);
            thread::spawn(move || loop {
                let guard = lock.read();
                if guard.is_empty() {
                    return;
                }
                let mut guard = match try_upgrade(guard) {
                    Ok(w) => w,
                    Err(r) => {
                        drop(r);
                        lock.write()
                    }
                };
                // the queue may have drained while we switched locks
                if let Some(v) = guard.pop_front() {
                    taken.write().push(v);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let mut taken = Arc::try_unwrap(taken).unwrap().into_inner();
    taken.sort_unstable();
    assert_eq!(taken, (0..total).collect::<Vec<_>>());
    assert!(lock.read().is_empty());
}

#[test]
fn downgrade_publishes_write() {
    let lock = Arc::new(RwLock::new(String::new()));

    let handles: Vec<_> = (0..4)
        .map(|id| {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                for _ in 0..200 {
                    let mut w = lock.write();
                    w.clear();
                    w.push_str(&id.to_string());
                    let r = RwLockWriteGuard::downgrade(w);
                    assert_eq!(*r, id.to_string());
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert!(!lock.is_locked());
}
