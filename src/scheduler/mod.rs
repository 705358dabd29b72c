pub mod fcfs;
pub mod priority;
pub mod srt;

use std::fmt;

use serde::Serialize;

use crate::core::{
    Ticks,
    state::{RunCtx, TaskId},
};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use srt::SrtScheduler;

/// Dispatch slice for the preemptive policies: selection is redone every tick.
pub const TICK_SLICE: Ticks = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First-come-first-served, non-preemptive
    Fcfs,
    /// Preemptive shortest-remaining-time
    Srt,
    /// Preemptive priority, lowest value first
    Priority,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Fcfs, Policy::Srt, Policy::Priority];

    /// Heading used by the text report.
    pub fn label(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Srt => "SJFP",
            Policy::Priority => "Priority",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "fcfs",
            Policy::Srt => "srt",
            Policy::Priority => "priority",
        };
        f.write_str(name)
    }
}

/// How simulated time moves while no task is eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAdvance {
    OneTick,
    NextArrival,
}

pub trait Scheduler {
    const POLICY: Policy;
    const IDLE: IdleAdvance;

    fn init(ctx: &RunCtx) -> Self;

    // Task arrived and is eligible from now on
    fn enqueue(&mut self, ctx: &RunCtx, task: TaskId);

    // Pick the task to run for the next slice. Must not remove it from the
    // ready set: the driver calls `dequeue` once the task completes.
    fn dispatch(&mut self, ctx: &RunCtx) -> Option<TaskId>;

    fn slice(&self, _ctx: &RunCtx, _task: TaskId) -> Ticks {
        TICK_SLICE
    }

    // Task ran for a slice and still has work left
    fn tick(&mut self, _ctx: &RunCtx, _task: TaskId) {}

    fn dequeue(&mut self, ctx: &RunCtx, task: TaskId);
}
