//! Single-CPU scheduling model.
//!
//! Runs a fixed batch of processes through first-come-first-served,
//! preemptive shortest-remaining-time and preemptive priority scheduling,
//! and reports turnaround, waiting and throughput per policy. Every run works
//! on its own snapshot of the input, so policies never see each other's
//! state.

pub mod core;
pub mod error;
pub mod loader;
pub mod report;
pub mod scheduler;
pub mod sim;
pub mod workload;

pub use error::{FieldError, LoadError, SimError, WorkloadError};
pub use scheduler::{Policy, Scheduler};
pub use sim::{Metrics, ProcessRecord, RunOutcome, Sim, simulate};
