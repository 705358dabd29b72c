use super::{IdleAdvance, Policy, RunCtx, Scheduler, TaskId};
use crate::core::{Priority, ReadyQueue};

/// Preemptive priority scheduling: the eligible task with the lowest
/// priority value runs each tick, ties go to the earliest input index.
/// When nothing is eligible the clock jumps straight to the next arrival.
pub struct PriorityScheduler {
    ready: ReadyQueue<Priority>,
}

impl Scheduler for PriorityScheduler {
    const POLICY: Policy = Policy::Priority;
    const IDLE: IdleAdvance = IdleAdvance::NextArrival;

    fn init(_ctx: &RunCtx) -> Self {
        Self {
            ready: ReadyQueue::default(),
        }
    }

    fn enqueue(&mut self, ctx: &RunCtx, task: TaskId) {
        self.ready.push(task, ctx.task(task).priority);
    }

    fn dispatch(&mut self, _ctx: &RunCtx) -> Option<TaskId> {
        self.ready.peek()
    }

    fn dequeue(&mut self, _ctx: &RunCtx, task: TaskId) {
        self.ready.remove(task);
    }
}
