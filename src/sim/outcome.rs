use average::{Estimate, Max, Mean};
use serde::Serialize;

use super::process::{ProcessId, ProcessRecord};
use crate::{
    core::{Priority, SchedEvent, Ticks},
    scheduler::Policy,
};

/// Timing of one process under one policy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessTiming {
    pub id: ProcessId,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    pub start: Ticks,
    pub finish: Ticks,
    pub turnaround: Ticks,
    pub waiting: Ticks,
    // Time to first run
    pub response: Ticks,
}

impl ProcessTiming {
    pub fn new(record: &ProcessRecord, start: Ticks, finish: Ticks) -> Self {
        let turnaround = finish - record.arrival_time;
        Self {
            id: record.id,
            arrival: record.arrival_time,
            burst: record.burst_duration,
            priority: record.priority,
            start,
            finish,
            turnaround,
            waiting: turnaround - record.burst_duration,
            response: start - record.arrival_time,
        }
    }
}

/// Everything one simulator run produced. Timings are in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub policy: Policy,
    pub timings: Vec<ProcessTiming>,
    pub total_turnaround: Ticks,
    pub total_waiting: Ticks,
    // Final clock value
    pub makespan: Ticks,
    // CPU ticks delivered across all processes
    pub service: Ticks,
    pub steps: u64,
    pub events: Vec<SchedEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub processes: usize,
    pub total_turnaround: Ticks,
    pub total_waiting: Ticks,
    pub makespan: Ticks,
    // None when there is nothing to average over
    pub avg_turnaround: Option<f64>,
    pub avg_waiting: Option<f64>,
    pub throughput: Option<f64>,
    pub avg_response: Option<f64>,
    pub max_waiting: Option<f64>,
    pub cpu_utilisation: Option<f64>,
    pub idle_ticks: Ticks,
}

impl RunOutcome {
    pub fn processes(&self) -> usize {
        self.timings.len()
    }

    pub fn metrics(&self) -> Metrics {
        let n = self.timings.len();
        let per_process = |total: Ticks| (n > 0).then(|| total as f64 / n as f64);
        let per_tick = |amount: f64| (self.makespan > 0).then(|| amount / self.makespan as f64);

        let avg_response = (n > 0).then(|| {
            self.timings
                .iter()
                .map(|timing| timing.response as f64)
                .collect::<Mean>()
                .estimate()
        });
        let max_waiting = (n > 0).then(|| {
            self.timings
                .iter()
                .map(|timing| timing.waiting as f64)
                .collect::<Max>()
                .max()
        });

        Metrics {
            processes: n,
            total_turnaround: self.total_turnaround,
            total_waiting: self.total_waiting,
            makespan: self.makespan,
            avg_turnaround: per_process(self.total_turnaround),
            avg_waiting: per_process(self.total_waiting),
            throughput: if n > 0 { per_tick(n as f64) } else { None },
            avg_response,
            max_waiting,
            cpu_utilisation: per_tick(self.service as f64),
            idle_ticks: self.makespan - self.service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(timings: Vec<ProcessTiming>, makespan: Ticks) -> RunOutcome {
        RunOutcome {
            policy: Policy::Fcfs,
            total_turnaround: timings.iter().map(|t| t.turnaround).sum(),
            total_waiting: timings.iter().map(|t| t.waiting).sum(),
            service: timings.iter().map(|t| t.burst).sum(),
            timings,
            makespan,
            steps: 0,
            events: Vec::new(),
        }
    }

    #[test]
    fn timing_derives_turnaround_and_waiting() {
        let timing = ProcessTiming::new(&ProcessRecord::new(4, 2, 3, 0), 5, 9);
        assert_eq!(timing.turnaround, 7);
        assert_eq!(timing.waiting, 4);
        assert_eq!(timing.response, 3);
    }

    #[test]
    fn empty_run_has_undefined_averages() {
        let metrics = outcome(Vec::new(), 0).metrics();
        assert_eq!(metrics.processes, 0);
        assert_eq!(metrics.total_turnaround, 0);
        assert_eq!(metrics.avg_turnaround, None);
        assert_eq!(metrics.avg_waiting, None);
        assert_eq!(metrics.throughput, None);
        assert_eq!(metrics.avg_response, None);
        assert_eq!(metrics.max_waiting, None);
        assert_eq!(metrics.cpu_utilisation, None);
    }

    #[test]
    fn supplemental_metrics() {
        let timings = vec![
            ProcessTiming::new(&ProcessRecord::new(1, 2, 4, 0), 2, 6),
            ProcessTiming::new(&ProcessRecord::new(2, 2, 2, 0), 6, 8),
        ];
        let metrics = outcome(timings, 8).metrics();
        assert_eq!(metrics.avg_response, Some(2.0));
        assert_eq!(metrics.max_waiting, Some(4.0));
        assert_eq!(metrics.cpu_utilisation, Some(0.75));
        assert_eq!(metrics.idle_ticks, 2);
        assert_eq!(metrics.throughput, Some(0.25));
    }
}
