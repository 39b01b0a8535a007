use average::{Estimate, Mean};
use serde::Serialize;

use crate::core::{Schedule, Ticks};
use crate::scheduler::Policy;

/// Aggregate figures for one policy run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub policy: Policy,
    pub processes: usize,
    pub dispatches: usize,
    /// Exact `total_wait / processes`; this is the figure written to result files.
    pub average_waiting_time: f64,
    pub mean_turnaround_time: f64,
    /// Time to first run.
    pub mean_response_time: f64,
    pub makespan: Ticks,
}

impl From<&Schedule> for Summary {
    fn from(schedule: &Schedule) -> Self {
        let turnaround = schedule.outcomes.iter().map(|o| o.turnaround() as f64);
        let response = schedule.outcomes.iter().map(|o| o.response() as f64);

        Self {
            policy: schedule.policy,
            processes: schedule.process_count(),
            dispatches: schedule.events.len(),
            average_waiting_time: schedule.average_waiting_time(),
            mean_turnaround_time: mean(turnaround),
            mean_response_time: mean(response),
            makespan: schedule.makespan(),
        }
    }
}

fn mean(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Workload;
    use crate::scheduler::{RoundRobinScheduler, Scheduler};

    #[test]
    fn round_robin_summary() {
        let workload = Workload::from_triples([(1, 0, 5), (2, 1, 3)]).unwrap();
        let schedule = RoundRobinScheduler::new(2).unwrap().schedule(&workload);
        let summary = Summary::from(&schedule);

        assert_eq!(summary.policy, Policy::RoundRobin);
        assert_eq!(summary.processes, 2);
        assert_eq!(summary.dispatches, 5);
        assert_eq!(summary.average_waiting_time, 3.0);
        // turnarounds 8 and 6, responses 0 and 1
        assert!((summary.mean_turnaround_time - 7.0).abs() < 1e-9);
        assert!((summary.mean_response_time - 0.5).abs() < 1e-9);
        assert_eq!(summary.makespan, 8);
    }
}
