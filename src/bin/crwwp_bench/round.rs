// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// One benchmark round: N workers released together by a barrier, each timing
// its own pass over the plan.

use std::sync::Barrier;
use std::thread;
use std::time::Instant;

use crate::workload::{Op, Plan};

/// A payload plus the synchronization guarding it.
pub trait Scenario: Sync {
    fn name(&self) -> &'static str;

    /// Write operation number `i` of the plan.
    fn write(&self, i: u64);

    fn read(&self);

    /// Tear down after all workers joined. Lock instances check their
    /// release contract here.
    fn finish(self)
    where
        Self: Sized,
    {
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct WorkerStats {
    reads: u64,
    writes: u64,
    micros: u64,
}

pub struct Report {
    pub name: &'static str,
    pub threads: usize,
    pub reads: u64,
    pub writes: u64,
    /// Mean per-thread wall time.
    pub seconds: f64,
}

pub fn run<S: Scenario>(scenario: S, plan: &Plan, threads: usize) -> Report {
    crwwp::set_expected_workers(u16::try_from(threads).unwrap_or(u16::MAX));
    log::debug!("round {}: {} threads x {} ops", scenario.name(), threads, plan.len());

    let barrier = Barrier::new(threads);
    let stats: Vec<WorkerStats> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| s.spawn(|| worker(&scenario, plan, &barrier)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let name = scenario.name();
    scenario.finish();

    let total = stats.iter().fold(WorkerStats::default(), |acc, w| WorkerStats {
        reads: acc.reads + w.reads,
        writes: acc.writes + w.writes,
        micros: acc.micros + w.micros,
    });
    Report {
        name,
        threads,
        reads: total.reads,
        writes: total.writes,
        seconds: (total.micros / threads as u64) as f64 / 1_000_000.0,
    }
}

fn worker<S: Scenario>(scenario: &S, plan: &Plan, barrier: &Barrier) -> WorkerStats {
    let mut stats = WorkerStats::default();
    barrier.wait();

    let t0 = Instant::now();
    for (i, op) in plan.ops().iter().enumerate() {
        match op {
            Op::Write => {
                stats.writes += 1;
                scenario.write(i as u64);
            }
            Op::Read => {
                stats.reads += 1;
                scenario.read();
            }
        }
    }
    stats.micros = t0.elapsed().as_micros() as u64;
    stats
}
