pub mod driver;
pub mod outcome;
pub mod process;

pub use driver::Sim;
pub use outcome::{Metrics, ProcessTiming, RunOutcome};
pub use process::{ProcessId, ProcessRecord};

use crate::{
    error::SimError,
    scheduler::{FcfsScheduler, Policy, PriorityScheduler, SrtScheduler},
};

/// Runs one policy over a fresh snapshot of `records`.
pub fn simulate(policy: Policy, records: &[ProcessRecord]) -> Result<RunOutcome, SimError> {
    match policy {
        Policy::Fcfs => Sim::<FcfsScheduler>::new(records).run(),
        Policy::Srt => Sim::<SrtScheduler>::new(records).run(),
        Policy::Priority => Sim::<PriorityScheduler>::new(records).run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_not_an_error() {
        for policy in Policy::ALL {
            let outcome = simulate(policy, &[]).unwrap();
            assert_eq!(outcome.policy, policy);
            assert_eq!(outcome.processes(), 0);
            assert_eq!(outcome.total_turnaround, 0);
            assert_eq!(outcome.total_waiting, 0);
            assert_eq!(outcome.makespan, 0);
            assert_eq!(outcome.metrics().throughput, None);
        }
    }

    #[test]
    fn runs_are_isolated_from_each_other() {
        let records = vec![
            ProcessRecord::new(1, 3, 5, 2),
            ProcessRecord::new(2, 0, 2, 1),
            ProcessRecord::new(3, 1, 1, 3),
        ];
        let srt_alone = simulate(Policy::Srt, &records).unwrap();

        simulate(Policy::Fcfs, &records).unwrap();
        let srt_after_fcfs = simulate(Policy::Srt, &records).unwrap();

        assert_eq!(srt_alone, srt_after_fcfs);
        assert_eq!(records[0], ProcessRecord::new(1, 3, 5, 2));
    }
}
