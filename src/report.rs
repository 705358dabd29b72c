//! Text and JSON rendering of simulation outcomes.

use std::fmt::Write;

use serde::Serialize;

use crate::{
    core::SchedEvent,
    sim::{Metrics, ProcessTiming, RunOutcome},
};

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub precision: usize,
    pub details: bool,
    pub trace: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            details: false,
            trace: false,
        }
    }
}

fn decimal(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{value:.precision$}"),
        None => "undefined".to_string(),
    }
}

pub fn render_text(outcome: &RunOutcome, options: &ReportOptions) -> String {
    let metrics = outcome.metrics();
    let precision = options.precision;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "--- {} ---", outcome.policy.label());
    let _ = writeln!(
        out,
        "Average Turnaround Time: {}",
        decimal(metrics.avg_turnaround, precision)
    );
    let _ = writeln!(
        out,
        "Average Waiting Time: {}",
        decimal(metrics.avg_waiting, precision)
    );
    let _ = writeln!(out, "Throughput: {}", decimal(metrics.throughput, precision));

    if options.details {
        write_details(&mut out, outcome, &metrics, precision);
    }
    if options.trace {
        write_trace(&mut out, outcome);
    }
    out
}

fn write_details(out: &mut String, outcome: &RunOutcome, metrics: &Metrics, precision: usize) {
    let _ = writeln!(
        out,
        "{:>6} {:>8} {:>6} {:>9} {:>6} {:>7} {:>11} {:>8}",
        "PID", "Arrival", "Burst", "Priority", "Start", "Finish", "Turnaround", "Waiting"
    );
    for timing in &outcome.timings {
        let _ = writeln!(
            out,
            "{:>6} {:>8} {:>6} {:>9} {:>6} {:>7} {:>11} {:>8}",
            timing.id,
            timing.arrival,
            timing.burst,
            timing.priority,
            timing.start,
            timing.finish,
            timing.turnaround,
            timing.waiting
        );
    }
    let _ = writeln!(
        out,
        "Makespan: {}  Idle: {}  CPU utilisation: {}  Avg response: {}  Max waiting: {}",
        metrics.makespan,
        metrics.idle_ticks,
        decimal(metrics.cpu_utilisation, precision),
        decimal(metrics.avg_response, precision),
        decimal(metrics.max_waiting, precision),
    );
}

fn write_trace(out: &mut String, outcome: &RunOutcome) {
    let pid = |task: usize| outcome.timings[task].id;
    for event in &outcome.events {
        let _ = match *event {
            SchedEvent::Dispatch { at, task } => writeln!(out, "t={at} dispatch P{}", pid(task)),
            SchedEvent::Preempt { at, task, by } => {
                writeln!(out, "t={at} preempt P{} by P{}", pid(task), pid(by))
            }
            SchedEvent::Complete { at, task } => writeln!(out, "t={at} complete P{}", pid(task)),
            SchedEvent::Idle { from, to } => writeln!(out, "t={from}..{to} idle"),
        };
    }
}

#[derive(Serialize)]
struct PolicyReport<'a> {
    policy: &'static str,
    metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    timings: Option<&'a [ProcessTiming]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [SchedEvent]>,
}

pub fn render_json(
    outcomes: &[RunOutcome],
    options: &ReportOptions,
) -> Result<String, serde_json::Error> {
    let reports: Vec<_> = outcomes
        .iter()
        .map(|outcome| PolicyReport {
            policy: outcome.policy.label(),
            metrics: outcome.metrics(),
            timings: options.details.then_some(outcome.timings.as_slice()),
            events: options.trace.then_some(outcome.events.as_slice()),
        })
        .collect();
    serde_json::to_string_pretty(&reports)
}
