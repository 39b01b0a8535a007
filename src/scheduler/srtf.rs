use tracing::debug;

use super::{Policy, Scheduler};
use crate::core::{Arrivals, PriorityReadySet, Recorder, Schedule, Ticks, Workload};

/// Preemptive Shortest-Remaining-Time-First.
///
/// A running process is preempted by an arrival whose burst is strictly shorter
/// than the running process's remaining time at the arrival instant. Equal
/// remaining times never preempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrtfScheduler;

impl Scheduler for SrtfScheduler {
    fn policy(&self) -> Policy {
        Policy::Srtf
    }

    fn schedule(&self, workload: &Workload) -> Schedule {
        let mut recorder = Recorder::new(Policy::Srtf, workload);
        let mut ready: PriorityReadySet<Ticks> = PriorityReadySet::with_capacity(workload.len());
        let mut arrivals = Arrivals::new(workload.processes());
        let mut now = 0;

        while !ready.is_empty() || !arrivals.is_exhausted() {
            while let Some(arrived) = arrivals.pop_arrived(now) {
                ready.insert(arrived, arrived.burst_time);
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
            let started = now;
            let finish_at = started + process.burst_time;
            let mut preempted = false;

            // Only the earliest arrival that undercuts the running process matters
            while let Some(arrived) = arrivals.pop_before(finish_at) {
                ready.insert(arrived, arrived.burst_time);

                let elapsed = arrived.arrival_time - started;
                let remaining = process.burst_time - elapsed;
                if arrived.burst_time < remaining {
                    debug!(
                        at = arrived.arrival_time,
                        preempted = process.id,
                        by = arrived.id,
                        remaining,
                        "preemption"
                    );
                    now = arrived.arrival_time;
                    recorder.run(&process, elapsed, now);
                    ready.insert(process.remnant(now, remaining), remaining);
                    preempted = true;
                    break;
                }
            }

            if !preempted {
                now = finish_at;
                recorder.run(&process, process.burst_time, now);
            }
        }

        recorder.finish(workload)
    }
}
