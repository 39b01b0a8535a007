use std::num::NonZeroU64;
use tracing::trace;

use super::{Policy, Scheduler};
use crate::core::{Arrivals, FifoReadySet, Recorder, Schedule, Ticks, Workload};
use crate::error::{SimError, SimResult};

/// Round-Robin with a fixed time quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobinScheduler {
    quantum: NonZeroU64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> SimResult<Self> {
        let quantum = NonZeroU64::new(quantum).ok_or(SimError::InvalidQuantum(quantum))?;
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum.get()
    }
}

impl Scheduler for RoundRobinScheduler {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        let quantum = self.quantum();
        let mut recorder = Recorder::new(Policy::RoundRobin, workload);
        let mut ready = FifoReadySet::with_capacity(workload.len());
        let mut arrivals = Arrivals::new(workload.processes());
        let mut now = 0;

        while !ready.is_empty() || !arrivals.is_exhausted() {
            let Some(process) = ready.pop() else {
                // Nothing runnable: the CPU idles until the next arrival
                if let Some(next) = arrivals.pop() {
                    ready.push(next);
                }
                continue;
            };

            now = now.max(process.arrival_time);
            recorder.dispatch(now, &process);
            let slice = quantum.min(process.burst_time);
            now += slice;
            recorder.run(&process, slice, now);

            // Arrivals during the slice queue ahead of the preempted process
            while let Some(arrived) = arrivals.pop_arrived(now) {
                ready.push(arrived);
            }

            if process.burst_time > quantum {
                trace!(now, id = process.id, remaining = process.burst_time - quantum, "quantum expired");
                ready.push(process.remnant(now, process.burst_time - quantum));
            }
        }

        recorder.finish(workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantum_rejected() {
        assert!(matches!(RoundRobinScheduler::new(0), Err(SimError::InvalidQuantum(0))));
        assert_eq!(RoundRobinScheduler::new(3).unwrap().quantum(), 3);
    }

    #[test]
    fn new_arrivals_queue_ahead_of_the_remnant() {
        let workload = Workload::from_triples([(1, 0, 5), (2, 1, 3)]).unwrap();
        let schedule = RoundRobinScheduler::new(2).unwrap().schedule(&workload);

        assert_eq!(
            schedule.event_pairs(),
            vec![(0, 1), (2, 2), (4, 1), (6, 2), (7, 1)]
        );
        // 1: 0 + (4-2) + (7-6) = 3, 2: (2-1) + (6-4) = 3
        assert_eq!(schedule.total_wait, 6);
        assert_eq!(schedule.average_waiting_time(), 3.0);
        assert_eq!(schedule.outcomes[0].completion_time, 8);
        assert_eq!(schedule.outcomes[1].completion_time, 7);
    }

    #[test]
    fn idle_cpu_waits_for_late_arrival() {
        let workload = Workload::from_triples([(1, 0, 1), (2, 5, 3)]).unwrap();
        let schedule = RoundRobinScheduler::new(2).unwrap().schedule(&workload);

        assert_eq!(schedule.event_pairs(), vec![(0, 1), (5, 2), (7, 2)]);
        assert_eq!(schedule.total_wait, 0);
    }

    #[test]
    fn large_quantum_degenerates_to_fcfs() {
        let workload = Workload::from_triples([(1, 0, 5), (2, 1, 3), (3, 2, 8)]).unwrap();
        let schedule = RoundRobinScheduler::new(100).unwrap().schedule(&workload);

        assert_eq!(schedule.event_pairs(), vec![(0, 1), (5, 2), (8, 3)]);
        assert_eq!(schedule.total_wait, 10);
    }

    #[test]
    fn exact_multiple_of_quantum_leaves_no_remnant() {
        let workload = Workload::from_triples([(1, 0, 4)]).unwrap();
        let schedule = RoundRobinScheduler::new(2).unwrap().schedule(&workload);

        assert_eq!(schedule.event_pairs(), vec![(0, 1), (2, 1)]);
        assert_eq!(schedule.total_wait, 0);
    }
}
