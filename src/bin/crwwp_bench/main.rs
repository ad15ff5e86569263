// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Compares the C-RW-WP lock against std Mutex / RwLock (and a lock-free queue)
// on list and queue payloads.
//
//   crwwp-bench <threads> <ops> <write_ratio> [--workload list|queue|all] [--seed N]

mod list;
mod queue;
mod round;
mod workload;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use log::info;

use crate::round::Report;
use crate::workload::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WorkloadKind {
    List,
    Queue,
    All,
}

#[derive(Parser, Debug)]
#[command(name = "crwwp-bench", version, about = "C-RW-WP lock benchmark")]
struct Cli {
    /// Worker threads per round.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    threads: u16,

    /// Operations performed by each thread.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    ops: u64,

    /// Percentage of operations that are writes (0-100).
    #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
    write_ratio: u8,

    /// Which payload to benchmark.
    #[arg(long, value_enum, default_value_t = WorkloadKind::All)]
    workload: WorkloadKind,

    /// Seed for the read/write plan (random if omitted).
    #[arg(long)]
    seed: Option<u64>,
}

fn print_header(title: &str) {
    println!("\n=== {} ===", title);
    println!(
        "{:>10} | {:>10} | {:>10} | {:>10} | {:>10} ",
        "", "threads", "reads", "writes", "seconds"
    );
}

fn print_row(r: &Report) {
    println!(
        "{:>10} | {:>10} | {:>10} | {:>10} | {:>10.4} ",
        r.name, r.threads, r.reads, r.writes, r.seconds
    );
}

fn bench_list(plan: &Plan, threads: usize) {
    print_header("list");
    print_row(&round::run(list::MutexList::default(), plan, threads));
    print_row(&round::run(list::StdRwLockList::default(), plan, threads));
    print_row(&round::run(list::CrwwpList::default(), plan, threads));
}

fn bench_queue(plan: &Plan, threads: usize) {
    let len = plan.len() * threads;
    print_header("queue");
    print_row(&round::run(queue::MutexQueue::new(len), plan, threads));
    print_row(&round::run(queue::StdRwLockQueue::new(len), plan, threads));
    print_row(&round::run(queue::CrwwpQueue::new(len), plan, threads));
    print_row(&round::run(queue::LfQueue::new(len), plan, threads));
}

fn run(cli: Cli) -> Result<()> {
    let threads = usize::from(cli.threads);
    let ops = usize::try_from(cli.ops)?;
    ensure!(
        ops.checked_mul(threads).is_some(),
        "{ops} ops x {threads} threads does not fit in memory"
    );

    let plan = Plan::generate(ops, cli.write_ratio, cli.seed);
    info!(
        "plan: {} reads, {} writes per thread ({}% writes requested)",
        plan.reads(),
        plan.writes(),
        cli.write_ratio
    );
    info!(
        "reader patience {} spins, {} hardware threads",
        crwwp::MAX_READER_PATIENCE,
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    );

    match cli.workload {
        WorkloadKind::List => bench_list(&plan, threads),
        WorkloadKind::Queue => bench_queue(&plan, threads),
        WorkloadKind::All => {
            bench_list(&plan, threads);
            bench_queue(&plan, threads);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}
