use super::{IdleAdvance, Policy, RunCtx, Scheduler, TaskId};
use crate::core::{ReadyQueue, Ticks};

/// Non-preemptive first-come-first-served. Ready tasks are ranked by
/// arrival time, equal arrivals keep input order, and the head runs its
/// whole remaining burst in one slice.
pub struct FcfsScheduler {
    ready: ReadyQueue<Ticks>,
}

impl Scheduler for FcfsScheduler {
    const POLICY: Policy = Policy::Fcfs;
    const IDLE: IdleAdvance = IdleAdvance::NextArrival;

    fn init(_ctx: &RunCtx) -> Self {
        Self {
            ready: ReadyQueue::default(),
        }
    }

    fn enqueue(&mut self, ctx: &RunCtx, task: TaskId) {
        self.ready.push(task, ctx.task(task).arrival_time);
    }

    fn dispatch(&mut self, _ctx: &RunCtx) -> Option<TaskId> {
        self.ready.peek()
    }

    fn slice(&self, ctx: &RunCtx, task: TaskId) -> Ticks {
        ctx.task(task).remaining
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
    fn runs_in_arrival_order_without_preemption() {
        let records = [ProcessRecord::new(1, 0, 4, 2), ProcessRecord::new(2, 1, 3, 1)];
        let outcome = Sim::<FcfsScheduler>::new(&records).run().unwrap();

        assert_eq!(outcome.timings[0].start, 0);
        assert_eq!(outcome.timings[0].finish, 4);
        assert_eq!(outcome.timings[1].start, 4);
        assert_eq!(outcome.timings[1].finish, 7);
        assert_eq!(outcome.total_turnaround, 10);
        assert_eq!(outcome.total_waiting, 3);
        assert_eq!(outcome.makespan, 7);

        let metrics = outcome.metrics();
        assert_eq!(metrics.avg_turnaround, Some(5.0));
        assert_eq!(metrics.avg_waiting, Some(1.5));
        assert_eq!(metrics.throughput, Some(2.0 / 7.0));
    }

    #[test]
    fn equal_arrivals_keep_input_order() {
        let records = [
            ProcessRecord::new(9, 2, 5, 0),
            ProcessRecord::new(3, 0, 1, 0),
            ProcessRecord::new(4, 2, 1, 0),
        ];
        let outcome = Sim::<FcfsScheduler>::new(&records).run().unwrap();

        let order: Vec<_> = outcome
            .events
            .iter()
            .filter_map(|event| match event {
                SchedEvent::Dispatch { task, .. } => Some(outcome.timings[*task].id),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![3, 9, 4]);
    }

    #[test]
    fn initial_gap_counts_towards_makespan() {
        let records = [ProcessRecord::new(1, 5, 2, 0)];
        let outcome = Sim::<FcfsScheduler>::new(&records).run().unwrap();

        assert_eq!(outcome.timings[0].start, 5);
        assert_eq!(outcome.makespan, 7);
        assert_eq!(outcome.events[0], SchedEvent::Idle { from: 0, to: 5 });
        assert_eq!(outcome.metrics().throughput, Some(1.0 / 7.0));
    }
}
