use serde::Serialize;

use crate::core::{TaskId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedEvent {
    // First dispatch, or a resume after preemption
    Dispatch {
        at: Ticks,
        task: TaskId,
    },
    Preempt {
        at: Ticks,
        task: TaskId,
        by: TaskId,
    },
    Complete {
        at: Ticks,
        task: TaskId,
    },
    // CPU had nothing eligible over [from, to)
    Idle {
        from: Ticks,
        to: Ticks,
    },
}
