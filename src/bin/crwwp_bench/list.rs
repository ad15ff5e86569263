// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// List workload: writes push a node at the head, reads walk the whole list.

use std::collections::LinkedList;
use std::hint::black_box;
use std::sync::{Mutex, PoisonError, RwLock};

use crate::round::Scenario;

fn walk(list: &LinkedList<u64>) {
    for v in list {
        black_box(v);
    }
}

#[derive(Default)]
pub struct MutexList {
    list: Mutex<LinkedList<u64>>,
}

impl Scenario for MutexList {
    fn name(&self) -> &'static str {
        "mutex"
    }

    fn write(&self, i: u64) {
        self.list
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_front(i);
    }

    fn read(&self) {
        walk(&self.list.lock().unwrap_or_else(PoisonError::into_inner));
    }
}

#[derive(Default)]
pub struct StdRwLockList {
    list: RwLock<LinkedList<u64>>,
}

impl Scenario for StdRwLockList {
    fn name(&self) -> &'static str {
        "rwlock"
    }

    fn write(&self, i: u64) {
        self.list
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_front(i);
    }

    fn read(&self) {
        walk(&self.list.read().unwrap_or_else(PoisonError::into_inner));
    }
}

#[derive(Default)]
pub struct CrwwpList {
    list: crwwp::RwLock<LinkedList<u64>>,
}

impl Scenario for CrwwpList {
    fn name(&self) -> &'static str {
        "c-rw-wp"
    }

    fn write(&self, i: u64) {
        self.list.write().push_front(i);
    }

    fn read(&self) {
        walk(&self.list.read());
    }

    fn finish(self) {
        // into_inner drops the raw lock, which checks nobody still holds it
        let list = self.list.into_inner();
        log::debug!("c-rw-wp list finished with {} nodes", list.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round;
    use crate::workload::Plan;

    #[test]
    fn crwwp_list_counts_every_write() {
        let plan = Plan::generate(200, 50, Some(9));
        let writes = plan.writes() as u64;
        let scenario = CrwwpList::default();
        let report = round::run(scenario, &plan, 4);
        assert_eq!(report.writes, writes * 4);
        assert_eq!(report.reads + report.writes, 800);
    }

    #[test]
    fn baselines_run() {
        let plan = Plan::generate(100, 20, Some(3));
        let m = round::run(MutexList::default(), &plan, 2);
        let r = round::run(StdRwLockList::default(), &plan, 2);
        assert_eq!(m.reads, r.reads);
        assert_eq!(m.name, "mutex");
        assert_eq!(r.name, "rwlock");
    }
}
