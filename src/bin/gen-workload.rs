//! Writes a seeded random process file to stdout.
//!
//! Usage:
//!   gen-workload --ticks 200 --seed 7 > procs.txt

use anyhow::{Context, Result};
use clap::Parser;
use cpu_sched_sim::workload::{self, WorkloadParams};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate a Bernoulli-arrival workload in `id,arrival,burst,priority` form
#[derive(Parser, Debug)]
#[command(name = "gen-workload")]
#[command(version, about, long_about = None)]
struct Args {
    /// Ticks over which arrivals are drawn
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Probability that a process arrives at a given tick
    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    /// Probability that an arriving process is short
    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    /// Burst length of short processes
    #[arg(long, default_value_t = 2)]
    short_burst: u64,

    /// Burst length of long processes
    #[arg(long, default_value_t = 6)]
    long_burst: u64,

    /// Lowest (most urgent) priority value
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    min_priority: i64,

    /// Highest priority value
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    max_priority: i64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose == 0 { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let params = WorkloadParams {
        ticks: args.ticks,
        p_arrival: args.p_arrival,
        p_short: args.p_short,
        short_burst: args.short_burst,
        long_burst: args.long_burst,
        priorities: args.min_priority..=args.max_priority,
        seed: args.seed,
    };
    let records =
        workload::bernoulli_processes(&params).context("invalid workload parameters")?;
    info!(processes = records.len(), seed = args.seed, "generated workload");

    print!("{}", workload::to_lines(&records));
    Ok(())
}
