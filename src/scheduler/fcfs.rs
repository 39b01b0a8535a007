use super::{Policy, Scheduler};
use crate::core::{Recorder, Schedule, Workload};

/// First-Come-First-Served: run every process to completion in arrival order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        let mut recorder = Recorder::new(Policy::Fcfs, workload);
        let mut now = 0;

        for process in workload.iter() {
            // CPU idles until the next arrival
            now = now.max(process.arrival_time);
            recorder.dispatch(now, process);
            now += process.burst_time;
            recorder.run(process, process.burst_time, now);
        }

        recorder.finish(workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_to_back_arrivals() {
        let workload = Workload::from_triples([(1, 0, 5), (2, 1, 3), (3, 2, 8)]).unwrap();
        let schedule = FcfsScheduler.schedule(&workload);

        assert_eq!(schedule.event_pairs(), vec![(0, 1), (5, 2), (8, 3)]);
        assert_eq!(schedule.total_wait, 10);
        assert!((schedule.average_waiting_time() - 10.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn idle_gap_jumps_the_clock() {
        let workload = Workload::from_triples([(1, 0, 2), (2, 10, 3), (3, 11, 1)]).unwrap();
        let schedule = FcfsScheduler.schedule(&workload);

        assert_eq!(schedule.event_pairs(), vec![(0, 1), (10, 2), (13, 3)]);
        assert_eq!(schedule.total_wait, 2);
        assert_eq!(schedule.makespan(), 14);
    }

    #[test]
    fn simultaneous_arrivals_keep_input_order() {
        let workload = Workload::from_triples([(7, 0, 1), (3, 0, 1), (5, 0, 1)]).unwrap();
        let ids: Vec<_> = FcfsScheduler
            .schedule(&workload)
            .events
            .iter()
            .map(|e| e.process_id)
            .collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }
}
