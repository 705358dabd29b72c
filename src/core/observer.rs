use super::state::{RunCtx, TaskState, Ticks};
use crate::error::SimError;

/// Checks the run invariants after every step and tallies delivered CPU
/// service.
#[derive(Debug, Default)]
pub struct Observer {
    service: Ticks,
    last_remaining: Vec<Ticks>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, ctx: &RunCtx) -> Result<(), SimError> {
        if self.last_remaining.len() != ctx.tasks.len() {
            self.last_remaining = ctx.tasks.iter().map(|task| task.burst).collect();
        }

        let mut service: Ticks = 0;
        let mut running = 0;
        for task in &ctx.tasks {
            let task_id = task.id;
            debug_assert!(
                task.remaining <= task.burst,
                "Task {task_id} remaining work exceeds its burst"
            );
            debug_assert!(
                task.remaining <= self.last_remaining[task_id],
                "Task {task_id} remaining work increased"
            );
            if let Some(start) = task.start_time {
                debug_assert!(
                    start >= task.arrival_time,
                    "Task {task_id} started before it arrived"
                );
            }
            match task.state {
                TaskState::Completed => {
                    debug_assert_eq!(task.remaining, 0, "Completed task {task_id} has work left");
                    debug_assert!(
                        task.finish_time
                            .is_some_and(|finish| finish - task.burst >= task.arrival_time),
                        "Completed task {task_id} finished too early"
                    );
                }
                TaskState::Running => running += 1,
                TaskState::Pending => debug_assert_eq!(
                    task.remaining, task.burst,
                    "Task {task_id} received service before arriving"
                ),
                TaskState::Ready => {}
            }

            self.last_remaining[task_id] = task.remaining;
            // Delivered service never exceeds the clock
            service = service
                .checked_add(task.burst - task.remaining)
                .ok_or(SimError::ClockOverflow { now: ctx.now })?;
        }

        debug_assert!(running <= 1, "{running} tasks running on a single CPU");
        debug_assert!(service >= self.service, "Delivered service went backwards");
        debug_assert!(service <= ctx.now, "More service delivered than time elapsed");
        self.service = service;
        Ok(())
    }

    /// Total CPU ticks delivered so far, summed over all tasks.
    pub fn service(&self) -> Ticks {
        self.service
    }
}
