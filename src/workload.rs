//! Seeded random workloads in the loader's line format.

use std::{fmt::Write, ops::RangeInclusive};

use rand::prelude::*;

use crate::{
    core::{Priority, Ticks},
    error::WorkloadError,
    sim::ProcessRecord,
};

/// Bernoulli arrival process: at each tick a process arrives with
/// probability `p_arrival`; its burst is `short_burst` with probability
/// `p_short`, otherwise `long_burst`.
#[derive(Debug, Clone)]
pub struct WorkloadParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub priorities: RangeInclusive<Priority>,
    pub seed: u64,
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            ticks: 100,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            priorities: 0..=4,
            seed: 0,
        }
    }
}

impl WorkloadParams {
    pub fn validate(&self) -> Result<(), WorkloadError> {
        for (name, value) in [("p_arrival", self.p_arrival), ("p_short", self.p_short)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WorkloadError::Probability { name, value });
            }
        }
        if self.short_burst == 0 {
            return Err(WorkloadError::ZeroBurst { name: "short_burst" });
        }
        if self.long_burst == 0 {
            return Err(WorkloadError::ZeroBurst { name: "long_burst" });
        }
        if self.priorities.is_empty() {
            return Err(WorkloadError::PriorityRange {
                min: *self.priorities.start(),
                max: *self.priorities.end(),
            });
        }
        Ok(())
    }
}

pub fn bernoulli_processes(params: &WorkloadParams) -> Result<Vec<ProcessRecord>, WorkloadError> {
    params.validate()?;
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut records = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let burst = if rng.random::<f64>() < params.p_short {
                params.short_burst
            } else {
                params.long_burst
            };
            let priority = rng.random_range(params.priorities.clone());

            records.push(ProcessRecord::new(
                records.len() as i64 + 1,
                t,
                burst,
                priority,
            ));
        }
    }

    Ok(records)
}

/// Renders records as `id,arrival,burst,priority` lines.
pub fn to_lines(records: &[ProcessRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            record.id, record.arrival_time, record.burst_duration, record.priority
        );
    }
    out
}
