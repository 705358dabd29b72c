use tracing::{debug, trace};

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{RunCtx, TaskId, TaskState, Ticks},
};
use crate::{error::SimError, scheduler::Scheduler};

pub struct SchedCore<S: Scheduler> {
    pub ctx: RunCtx,
    pub scheduler: S,
    observer: Observer,
    current: Option<TaskId>,
    events: Vec<SchedEvent>,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(ctx: RunCtx) -> Self {
        let scheduler = S::init(&ctx);
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
            current: None,
            events: Vec::new(),
        }
    }

    // Give the CPU one slice of work. Returns the task that ran, or None if
    // nothing was eligible and the CPU stayed idle.
    pub fn tick(&mut self) -> Result<Option<TaskId>, SimError> {
        let Some(task_id) = self.scheduler.dispatch(&self.ctx) else {
            return Ok(None);
        };
        let now = self.ctx.now;

        if self.current != Some(task_id) {
            if let Some(prev) = self.current.take() {
                // Completed tasks release the CPU in-place, so `prev` still has work
                self.ctx.task_mut(prev).state = TaskState::Ready;
                self.events.push(SchedEvent::Preempt {
                    at: now,
                    task: prev,
                    by: task_id,
                });
                debug!(now, task = prev, by = task_id, policy = %S::POLICY, "preempt");
            }
            self.ctx.set_running(task_id);
            self.current = Some(task_id);
            self.events.push(SchedEvent::Dispatch { at: now, task: task_id });
            debug!(now, task = task_id, policy = %S::POLICY, "dispatch");
        }

        let slice = self.scheduler.slice(&self.ctx, task_id).max(1);
        let remaining = self.ctx.run_for(task_id, slice)?;
        trace!(now = self.ctx.now, task = task_id, remaining, "ran");

        if remaining == 0 {
            self.ctx.mark_completed(task_id);
            self.scheduler.dequeue(&self.ctx, task_id);
            self.current = None;
            self.events.push(SchedEvent::Complete {
                at: self.ctx.now,
                task: task_id,
            });
            debug!(now = self.ctx.now, task = task_id, policy = %S::POLICY, "complete");
        } else {
            self.scheduler.tick(&self.ctx, task_id);
        }

        self.observer.observe(&self.ctx)?;
        Ok(Some(task_id))
    }

    pub fn wake_task(&mut self, task: TaskId) {
        self.ctx.mark_ready(task);
        self.scheduler.enqueue(&self.ctx, task);
    }

    // Leave the CPU idle until `until`, merging with an idle span that ends now
    pub fn idle_until(&mut self, until: Ticks) -> Result<(), SimError> {
        let now = self.ctx.now;
        debug_assert!(until > now, "Idle span must move time forward");
        debug_assert!(self.current.is_none(), "CPU idles while a task holds it");

        match self.events.last_mut() {
            Some(SchedEvent::Idle { to, .. }) if *to == now => *to = until,
            _ => self.events.push(SchedEvent::Idle { from: now, to: until }),
        }
        trace!(from = now, to = until, "idle");
        self.ctx.advance_time(until - now)
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn into_parts(self) -> (RunCtx, Observer, Vec<SchedEvent>) {
        (self.ctx, self.observer, self.events)
    }
}
