//! Error types for loading, simulating and generating workloads

use std::{io, num::ParseIntError, path::PathBuf};

use thiserror::Error;

use crate::{
    core::{TaskId, Ticks},
    sim::ProcessId,
};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error on line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: FieldError },

    #[error("line {line}: duplicate process id {id} (first defined on line {first_line})")]
    DuplicateId {
        line: usize,
        id: ProcessId,
        first_line: usize,
    },
}

/// Why a single input line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing or non-numeric `{field}` field")]
    Missing { field: &'static str },

    #[error("`{field}` field {text:?}: {source}")]
    OutOfRange {
        field: &'static str,
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("arrival time must not be negative, got {0}")]
    NegativeArrival(i64),

    #[error("burst duration must be positive, got {0}")]
    NonPositiveBurst(i64),

    #[error("unexpected trailing input {0:?}")]
    Trailing(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("simulation stalled at t={now}: {incomplete} process(es) incomplete and no arrival pending")]
    Stalled { now: Ticks, incomplete: usize },

    #[error("task {task} completed without a recorded {field}")]
    MissingTiming { task: TaskId, field: &'static str },

    #[error("simulated clock overflowed past t={now}")]
    ClockOverflow { now: Ticks },

    #[error("total {metric} time does not fit in {} ticks", Ticks::MAX)]
    TotalOverflow { metric: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkloadError {
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("burst length `{name}` must be positive")]
    ZeroBurst { name: &'static str },

    #[error("empty priority range {min}..={max}")]
    PriorityRange { min: i64, max: i64 },
}
