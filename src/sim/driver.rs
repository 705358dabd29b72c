use tracing::{debug, info, warn};

use super::{
    outcome::{ProcessTiming, RunOutcome},
    process::ProcessRecord,
};
use crate::{
    core::{RunCtx, SchedCore, TaskId, Ticks},
    error::SimError,
    scheduler::{IdleAdvance, Scheduler},
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    records: Vec<ProcessRecord>,
    // Task ids in arrival order, ties by input index
    arrivals: Vec<TaskId>,
    arrival_cursor: usize,
    steps: u64,
}

impl<S: Scheduler> Sim<S> {
    /// Builds a run over a private copy of `records`. Nothing the run does is
    /// visible to the caller or to any other run.
    pub fn new(records: &[ProcessRecord]) -> Self {
        let records = records.to_vec();
        let mut ctx = RunCtx::new();
        for record in &records {
            let task_id =
                ctx.create_task(record.arrival_time, record.burst_duration, record.priority);
            debug_assert_eq!(ctx.task(task_id).id, task_id, "TaskId must match Vec index");
        }

        let mut arrivals: Vec<TaskId> = (0..records.len()).collect();
        // Stable: equal arrivals keep input order
        arrivals.sort_by_key(|&task| records[task].arrival_time);

        Self {
            core: SchedCore::<S>::new(ctx),
            records,
            arrivals,
            arrival_cursor: 0,
            steps: 0,
        }
    }

    pub fn step(&mut self) -> Result<(), SimError> {
        self.steps += 1;
        self.handle_arrivals();
        if self.core.tick()?.is_some() {
            return Ok(());
        }

        let now = self.core.now();
        let Some(next_arrival) = self.next_arrival() else {
            return Err(SimError::Stalled {
                now,
                incomplete: self.core.ctx.incomplete(),
            });
        };
        let until = match S::IDLE {
            IdleAdvance::OneTick => now
                .checked_add(1)
                .ok_or(SimError::ClockOverflow { now })?,
            IdleAdvance::NextArrival => next_arrival,
        };
        self.core.idle_until(until)
    }

    fn handle_arrivals(&mut self) {
        let now = self.core.now();
        // Contiguous, since arrivals are sorted
        while let Some(&task) = self.arrivals.get(self.arrival_cursor) {
            if self.records[task].arrival_time > now {
                break;
            }
            self.arrival_cursor += 1;

            if self.records[task].burst_duration == 0 {
                warn!(
                    id = self.records[task].id,
                    "process has no CPU work and can never be scheduled"
                );
                continue;
            }
            debug!(now, task, id = self.records[task].id, "arrival");
            self.core.wake_task(task);
        }
    }

    fn next_arrival(&self) -> Option<Ticks> {
        self.arrivals
            .get(self.arrival_cursor)
            .map(|&task| self.records[task].arrival_time)
    }

    pub fn all_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    pub fn run(mut self) -> Result<RunOutcome, SimError> {
        while !self.all_completed() {
            self.step()?;
        }
        self.into_outcome()
    }

    fn into_outcome(self) -> Result<RunOutcome, SimError> {
        let Self {
            core,
            records,
            steps,
            ..
        } = self;
        let service = core.observer().service();
        let (ctx, _observer, events) = core.into_parts();

        let timings = ctx
            .tasks
            .iter()
            .zip(&records)
            .map(|(task, record)| {
                let start = task.start_time.ok_or(SimError::MissingTiming {
                    task: task.id,
                    field: "start time",
                })?;
                let finish = task.finish_time.ok_or(SimError::MissingTiming {
                    task: task.id,
                    field: "finish time",
                })?;
                Ok(ProcessTiming::new(record, start, finish))
            })
            .collect::<Result<Vec<_>, SimError>>()?;

        let outcome = RunOutcome {
            policy: S::POLICY,
            total_turnaround: checked_total(&timings, "turnaround", |timing| timing.turnaround)?,
            total_waiting: checked_total(&timings, "waiting", |timing| timing.waiting)?,
            timings,
            makespan: ctx.now,
            service,
            steps,
            events,
        };
        info!(
            policy = %S::POLICY,
            processes = outcome.processes(),
            makespan = outcome.makespan,
            steps,
            "run complete"
        );
        Ok(outcome)
    }
}

fn checked_total(
    timings: &[ProcessTiming],
    metric: &'static str,
    value: impl Fn(&ProcessTiming) -> Ticks,
) -> Result<Ticks, SimError> {
    timings
        .iter()
        .try_fold(0, |total: Ticks, timing| total.checked_add(value(timing)))
        .ok_or(SimError::TotalOverflow { metric })
}
