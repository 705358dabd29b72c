use serde::Serialize;

use crate::core::{Priority, Ticks};

pub type ProcessId = i64;

/// One line of input. Read-only for the lifetime of every simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_duration: Ticks,
    pub priority: Priority,
}

impl ProcessRecord {
    pub fn new(
        id: ProcessId,
        arrival_time: Ticks,
        burst_duration: Ticks,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            arrival_time,
            burst_duration,
            priority,
        }
    }
}
