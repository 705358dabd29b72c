use super::{IdleAdvance, Policy, RunCtx, Scheduler, TaskId};
use crate::core::{ReadyQueue, Ticks};

/// Preemptive shortest-remaining-time. Every tick the eligible task with the
/// least remaining work runs; ties go to the earliest input index. Idle time
/// is walked one tick at a time.
pub struct SrtScheduler {
    ready: ReadyQueue<Ticks>,
}

impl Scheduler for SrtScheduler {
    const POLICY: Policy = Policy::Srt;
    const IDLE: IdleAdvance = IdleAdvance::OneTick;

    fn init(_ctx: &RunCtx) -> Self {
        Self {
            ready: ReadyQueue::default(),
        }
    }

    fn enqueue(&mut self, ctx: &RunCtx, task: TaskId) {
        self.ready.push(task, ctx.task(task).remaining);
    }

    fn dispatch(&mut self, _ctx: &RunCtx) -> Option<TaskId> {
        self.ready.peek()
    }

    fn tick(&mut self, ctx: &RunCtx, task: TaskId) {
        self.ready.rekey(task, ctx.task(task).remaining);
    }

    fn dequeue(&mut self, _ctx: &RunCtx, task: TaskId) {
        self.ready.remove(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::SchedEvent,
        sim::{ProcessRecord, Sim},
    };

    #[test]
    fn shorter_arrival_preempts_running_task() {
        let records = [ProcessRecord::new(1, 0, 6, 2), ProcessRecord::new(2, 2, 2, 1)];
        let outcome = Sim::<SrtScheduler>::new(&records).run().unwrap();

        assert_eq!(outcome.timings[1].finish, 4);
        assert_eq!(outcome.timings[1].turnaround, 2);
        assert_eq!(outcome.timings[1].waiting, 0);
        assert_eq!(outcome.timings[0].finish, 8);
        assert_eq!(outcome.timings[0].turnaround, 8);
        assert_eq!(outcome.timings[0].waiting, 2);
        assert!(outcome.events.contains(&SchedEvent::Preempt { at: 2, task: 0, by: 1 }));

        let metrics = outcome.metrics();
        assert_eq!(metrics.avg_turnaround, Some(5.0));
        assert_eq!(metrics.avg_waiting, Some(1.0));
        assert_eq!(metrics.throughput, Some(0.25));
    }

    #[test]
    fn equal_remaining_goes_to_earliest_index() {
        // Both have 3 ticks left at t=1; index 0 keeps the CPU
        let records = [ProcessRecord::new(7, 0, 4, 0), ProcessRecord::new(3, 1, 3, 0)];
        let outcome = Sim::<SrtScheduler>::new(&records).run().unwrap();

        assert_eq!(outcome.timings[0].finish, 4);
        assert_eq!(outcome.timings[1].start, 4);
        assert_eq!(outcome.timings[1].finish, 7);
    }

    #[test]
    fn idles_tick_by_tick_until_arrival() {
        let records = [ProcessRecord::new(1, 3, 2, 0)];
        let outcome = Sim::<SrtScheduler>::new(&records).run().unwrap();

        assert_eq!(outcome.events[0], SchedEvent::Idle { from: 0, to: 3 });
        assert_eq!(outcome.timings[0].start, 3);
        assert_eq!(outcome.makespan, 5);
    }

    #[test]
    fn start_time_is_first_dispatch_not_last() {
        let records = [ProcessRecord::new(1, 0, 5, 0), ProcessRecord::new(2, 1, 1, 0)];
        let outcome = Sim::<SrtScheduler>::new(&records).run().unwrap();

        assert_eq!(outcome.timings[0].start, 0);
        assert_eq!(outcome.timings[0].response, 0);
        assert_eq!(outcome.timings[1].start, 1);
        assert_eq!(outcome.timings[0].finish, 6);
    }
}
