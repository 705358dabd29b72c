use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cpu_sched_sim::Policy;

/// Simulate FCFS, preemptive SRT and preemptive priority scheduling over a
/// batch of processes read from a file.
#[derive(Parser, Debug)]
#[command(name = "cpu-sched-sim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Process file: one `id,arrival,burst,priority` per line
    pub input: PathBuf,

    /// Policies to run, in order (default: fcfs, srt, priority)
    #[arg(short, long = "policy", value_enum)]
    pub policies: Vec<Policy>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Decimal places for text output
    #[arg(long, default_value_t = 4)]
    pub precision: usize,

    /// Print per-process timings
    #[arg(long)]
    pub details: bool,

    /// Print the dispatch/preempt/idle timeline
    #[arg(long)]
    pub trace: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    // Requested policies without repeats, or all of them
    pub fn policies(&self) -> Vec<Policy> {
        if self.policies.is_empty() {
            return Policy::ALL.to_vec();
        }
        let mut policies = Vec::with_capacity(self.policies.len());
        for &policy in &self.policies {
            if !policies.contains(&policy) {
                policies.push(policy);
            }
        }
        policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_policies() {
        let cli = Cli::try_parse_from(["cpu-sched-sim", "procs.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("procs.txt"));
        assert_eq!(cli.policies(), Policy::ALL.to_vec());
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.precision, 4);
    }

    #[test]
    fn policies_keep_order_and_drop_repeats() {
        let cli = Cli::try_parse_from([
            "cpu-sched-sim",
            "-p",
            "priority",
            "--policy",
            "fcfs",
            "-p",
            "priority",
            "procs.txt",
        ])
        .unwrap();
        assert_eq!(cli.policies(), vec![Policy::Priority, Policy::Fcfs]);
    }

    #[test]
    fn missing_or_extra_input_is_a_usage_error() {
        assert!(Cli::try_parse_from(["cpu-sched-sim"]).is_err());
        assert!(Cli::try_parse_from(["cpu-sched-sim", "a.txt", "b.txt"]).is_err());
    }
}
