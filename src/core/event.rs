use std::fmt;
use tracing::trace;

use super::state::{Process, ProcessId, Ticks, Workload};
use crate::scheduler::Policy;

/// The CPU switched to `process_id` at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub timestamp: Ticks,
    pub process_id: ProcessId,
}

impl fmt::Display for ScheduleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.timestamp, self.process_id)
    }
}

impl From<(Ticks, ProcessId)> for ScheduleEvent {
    fn from((timestamp, process_id): (Ticks, ProcessId)) -> Self {
        Self {
            timestamp,
            process_id,
        }
    }
}

/// Per-record accounting for one input process across all of its remnants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub first_dispatch: Ticks,
    pub completion_time: Ticks,
}

impl ProcessOutcome {
    pub fn turnaround(&self) -> Ticks {
        self.completion_time - self.arrival_time
    }

    pub fn waiting(&self) -> Ticks {
        self.turnaround() - self.burst_time
    }

    pub fn response(&self) -> Ticks {
        self.first_dispatch - self.arrival_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub policy: Policy,
    pub events: Vec<ScheduleEvent>,
    pub total_wait: Ticks,
    /// One entry per input record, in workload order.
    pub outcomes: Vec<ProcessOutcome>,
}

impl Schedule {
    pub fn process_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Total wait divided by the number of input records, never by the number
    /// of dispatches. A [`Workload`] is never empty, so the divisor is positive.
    pub fn average_waiting_time(&self) -> f64 {
        self.total_wait as f64 / self.process_count() as f64
    }

    pub fn event_pairs(&self) -> Vec<(Ticks, ProcessId)> {
        self.events
            .iter()
            .map(|e| (e.timestamp, e.process_id))
            .collect()
    }

    pub fn makespan(&self) -> Ticks {
        self.outcomes
            .iter()
            .map(|o| o.completion_time)
            .max()
            .unwrap_or(0)
    }
}

/// Collects dispatches and service slices while an engine runs.
#[derive(Debug)]
pub struct Recorder {
    policy: Policy,
    events: Vec<ScheduleEvent>,
    total_wait: Ticks,
    first_dispatch: Vec<Option<Ticks>>,
    completion: Vec<Option<Ticks>>,
    service: Vec<Ticks>,
}

impl Recorder {
    pub fn new(policy: Policy, workload: &Workload) -> Self {
        let n = workload.len();
        Self {
            policy,
            events: Vec::with_capacity(n),
            total_wait: 0,
            first_dispatch: vec![None; n],
            completion: vec![None; n],
            service: vec![0; n],
        }
    }

    pub fn dispatch(&mut self, now: Ticks, process: &Process) {
        debug_assert!(
            now >= process.arrival_time,
            "Process {} dispatched at {now} before it arrived at {}",
            process.id,
            process.arrival_time
        );
        trace!(policy = %self.policy, now, id = process.id, remaining = process.burst_time, "dispatch");

        self.events.push(ScheduleEvent {
            timestamp: now,
            process_id: process.id,
        });
        self.total_wait += now - process.arrival_time;
        self.first_dispatch[process.seq].get_or_insert(now);
    }

    /// Account `slice` ticks of service to `process`, ending at `end`. A slice
    /// covering the record's whole remaining burst completes it.
    pub fn run(&mut self, process: &Process, slice: Ticks, end: Ticks) {
        debug_assert!(slice > 0 && slice <= process.burst_time);
        self.service[process.seq] += slice;
        if slice == process.burst_time {
            self.completion[process.seq] = Some(end);
        }
    }

    pub fn finish(self, workload: &Workload) -> Schedule {
        let outcomes = workload
            .iter()
            .map(|process| {
                debug_assert_eq!(
                    self.service[process.seq], process.burst_time,
                    "Process {} received service unequal to its burst",
                    process.id
                );
                ProcessOutcome {
                    id: process.id,
                    arrival_time: process.arrival_time,
                    burst_time: process.burst_time,
                    first_dispatch: self.first_dispatch[process.seq]
                        .expect("Every process must be dispatched at least once"),
                    completion_time: self.completion[process.seq]
                        .expect("Every process must run to completion"),
                }
            })
            .collect();

        Schedule {
            policy: self.policy,
            events: self.events,
            total_wait: self.total_wait,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_metrics() {
        let outcome = ProcessOutcome {
            id: 1,
            arrival_time: 2,
            burst_time: 3,
            first_dispatch: 4,
            completion_time: 10,
        };
        assert_eq!(outcome.turnaround(), 8);
        assert_eq!(outcome.waiting(), 5);
        assert_eq!(outcome.response(), 2);
    }

    #[test]
    fn event_display_matches_tuple_form() {
        assert_eq!(ScheduleEvent::from((12, 3)).to_string(), "(12, 3)");
    }

    #[test]
    fn recorder_accumulates_wait_per_dispatch() {
        let workload = Workload::from_triples([(1, 0, 4), (2, 1, 2)]).unwrap();
        let [a, b] = [workload.processes()[0], workload.processes()[1]];
        let mut recorder = Recorder::new(Policy::RoundRobin, &workload);

        recorder.dispatch(0, &a);
        recorder.run(&a, 2, 2);
        recorder.dispatch(2, &b);
        recorder.run(&b, 2, 4);
        let rest = a.remnant(2, 2);
        recorder.dispatch(4, &rest);
        recorder.run(&rest, 2, 6);

        let schedule = recorder.finish(&workload);
        assert_eq!(schedule.event_pairs(), vec![(0, 1), (2, 2), (4, 1)]);
        assert_eq!(schedule.total_wait, 3);
        assert_eq!(schedule.average_waiting_time(), 1.5);
        assert_eq!(schedule.makespan(), 6);
        assert_eq!(schedule.outcomes[0].completion_time, 6);
        assert_eq!(schedule.outcomes[1].waiting(), 1);
    }
}
