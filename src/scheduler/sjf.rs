use tracing::{debug, trace};

use super::estimator::{BurstEstimator, Estimate};
use super::{DEFAULT_ALPHA, DEFAULT_INITIAL_ESTIMATE, Policy, Scheduler};
use crate::core::{Arrivals, PriorityReadySet, Recorder, Schedule, Workload};
use crate::error::SimResult;

/// Non-preemptive Shortest-Job-First ranked by predicted, not true, burst.
///
/// Predictions come from a fresh [`BurstEstimator`] per run, so a process id
/// that recurs in the workload is ranked by the bursts it actually ran earlier
/// in the same run.
#[derive(Debug, Clone)]
pub struct SjfScheduler {
    estimator: BurstEstimator,
}

impl SjfScheduler {
    pub fn new(alpha: f64, initial_estimate: f64) -> SimResult<Self> {
        Ok(Self {
            estimator: BurstEstimator::new(alpha, initial_estimate)?,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.estimator.alpha()
    }

    pub fn initial_estimate(&self) -> f64 {
        self.estimator.initial()
    }
}

impl Default for SjfScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, DEFAULT_INITIAL_ESTIMATE)
            .expect("Default SJF parameters are valid")
    }
}

impl Scheduler for SjfScheduler {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        if !workload.has_recurring_ids() {
            debug!(
                initial = self.estimator.initial(),
                "no process id recurs; SJF ranks every process by the initial estimate"
            );
        }

        let mut estimator = self.estimator.clone();
        let mut recorder = Recorder::new(Policy::Sjf, workload);
        let mut ready: PriorityReadySet<Estimate> = PriorityReadySet::with_capacity(workload.len());
        let mut arrivals = Arrivals::new(workload.processes());
        let mut now = 0;

        while !ready.is_empty() || !arrivals.is_exhausted() {
            while let Some(arrived) = arrivals.pop_arrived(now) {
                ready.insert(arrived, estimator.predict(arrived.id));
            }

            let Some(process) = ready.pop_min() else {
                // Idle until the next batch of arrivals
                if let Some(next) = arrivals.peek() {
                    now = now.max(next.arrival_time);
                }
                continue;
            };

            now = now.max(process.arrival_time);
            recorder.dispatch(now, &process);
            now += process.burst_time;
            recorder.run(&process, process.burst_time, now);

            let next = estimator.observe(process.id, process.burst_time);
            let reranked = ready.rerank(|p| (p.id == process.id).then_some(next));
            trace!(id = process.id, estimate = next.0, reranked, "burst estimate updated");
        }

        recorder.finish(workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FcfsScheduler;

    #[test]
    fn single_burst_ids_fall_back_to_arrival_order() {
        let workload = Workload::from_triples([(1, 0, 9), (2, 1, 1), (3, 1, 4), (4, 20, 2)]).unwrap();
        let sjf = SjfScheduler::default().schedule(&workload);
        let fcfs = FcfsScheduler.schedule(&workload);

        assert_eq!(sjf.events, fcfs.events);
        assert_eq!(sjf.total_wait, fcfs.total_wait);
    }

    #[test]
    fn recurring_id_is_reranked_after_its_burst() {
        // id 1 runs 2 ticks, its estimate drops to 3.5 and its queued second
        // burst overtakes id 2 (still at the initial 5)
        let workload = Workload::from_triples([(5, 0, 10), (1, 0, 2), (2, 0, 3), (1, 0, 2)]).unwrap();
        let schedule = SjfScheduler::default().schedule(&workload);

        assert_eq!(
            schedule.event_pairs(),
            vec![(0, 5), (10, 1), (12, 1), (14, 2)]
        );
        assert_eq!(schedule.total_wait, 36);
        assert_eq!(schedule.average_waiting_time(), 9.0);
    }

    #[test]
    fn long_history_pushes_an_id_back() {
        let workload = Workload::from_triples([(1, 0, 6), (2, 1, 3), (1, 2, 2), (3, 2, 4)]).unwrap();
        let schedule = SjfScheduler::default().schedule(&workload);

        // id 1 is predicted at 5.5 after its first burst; ids 2 and 3 stay at 5
        assert_eq!(
            schedule.event_pairs(),
            vec![(0, 1), (6, 2), (9, 3), (13, 1)]
        );
        assert_eq!(schedule.total_wait, 23);
    }

    #[test]
    fn idle_gap_between_batches() {
        let workload = Workload::from_triples([(1, 0, 2), (2, 8, 1)]).unwrap();
        let schedule = SjfScheduler::default().schedule(&workload);
        assert_eq!(schedule.event_pairs(), vec![(0, 1), (8, 2)]);
        assert_eq!(schedule.total_wait, 0);
    }

    #[test]
    fn parameters_are_configurable() {
        let sjf = SjfScheduler::new(0.25, 3.0).unwrap();
        assert_eq!(sjf.alpha(), 0.25);
        assert_eq!(sjf.initial_estimate(), 3.0);
        assert!(SjfScheduler::new(-0.1, 3.0).is_err());
    }
}
