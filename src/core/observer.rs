use super::event::Schedule;
use super::state::Workload;
use crate::scheduler::Policy;

/// Debug-time invariant checks over every finished schedule.
#[derive(Debug, Default)]
pub struct Observer {
    runs: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { runs: 0 }
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn observe(&mut self, workload: &Workload, schedule: &Schedule) {
        self.runs += 1;
        let policy = schedule.policy;

        debug_assert_eq!(
            schedule.outcomes.len(),
            workload.len(),
            "{policy}: outcome count must match the workload"
        );

        for pair in schedule.events.windows(2) {
            debug_assert!(
                pair[0].timestamp <= pair[1].timestamp,
                "{policy}: event {} precedes {} out of order",
                pair[1],
                pair[0]
            );
        }

        match policy {
            Policy::Fcfs | Policy::Sjf => debug_assert_eq!(
                schedule.events.len(),
                workload.len(),
                "{policy}: non-preemptive policies dispatch each process exactly once"
            ),
            Policy::RoundRobin | Policy::Srtf => debug_assert!(
                schedule.events.len() >= workload.len(),
                "{policy}: fewer dispatches than processes"
            ),
        }

        if policy == Policy::Fcfs {
            debug_assert!(
                schedule
                    .events
                    .iter()
                    .zip(workload.iter())
                    .all(|(event, process)| event.process_id == process.id),
                "FCFS must dispatch in input order"
            );
        }

        for (outcome, process) in schedule.outcomes.iter().zip(workload.iter()) {
            debug_assert_eq!(outcome.id, process.id);
            debug_assert!(
                outcome.first_dispatch >= outcome.arrival_time
                    && outcome.completion_time >= outcome.first_dispatch + outcome.burst_time,
                "{policy}: process {} finished before it could have run its burst",
                outcome.id
            );
        }

        let summed: u64 = schedule.outcomes.iter().map(|o| o.waiting()).sum();
        debug_assert_eq!(
            summed, schedule.total_wait,
            "{policy}: per-process waits must add up to the total wait"
        );
    }
}
