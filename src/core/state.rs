use rustc_hash::FxHashSet;
use slotmap::new_key_type;

use crate::error::{SimError, SimResult};

pub type ProcessId = i64;
pub type Ticks = u64;
new_key_type! {
    pub struct ProcessKey;
}

/// A unit of CPU work as seen by the engines.
///
/// Records are never mutated once admitted: when RR or SRTF split a process,
/// [`Process::remnant`] produces a fresh record that shares `id`,
/// `original_arrival_time` and `seq` with its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub id: ProcessId,
    /// Time the record became ready. For remnants, the instant it was re-queued.
    pub arrival_time: Ticks,
    /// Remaining service for this record.
    pub burst_time: Ticks,
    pub original_arrival_time: Ticks,
    /// Position in the sorted workload; last-resort tie-break and outcome index.
    pub seq: usize,
}

impl Process {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            original_arrival_time: arrival_time,
            seq: 0,
        }
    }

    pub fn remnant(&self, resumed_at: Ticks, remaining: Ticks) -> Self {
        debug_assert!(
            remaining > 0 && remaining < self.burst_time,
            "Remnant of process {} must shrink its burst ({} -> {})",
            self.id,
            self.burst_time,
            remaining
        );
        Self {
            arrival_time: resumed_at,
            burst_time: remaining,
            ..*self
        }
    }
}

/// The immutable input snapshot every policy runs against.
///
/// Sorted by arrival time (stable, so ties keep input order) and guaranteed
/// non-empty with positive bursts. The latest arrival plus the total work, and
/// that horizon times the process count (the bound on total wait), both fit in
/// [`Ticks`], so no engine clock or wait sum can overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    pub fn new(mut processes: Vec<Process>) -> SimResult<Self> {
        if processes.is_empty() {
            return Err(SimError::EmptyWorkload);
        }
        if let Some(process) = processes.iter().find(|p| p.burst_time == 0) {
            return Err(SimError::ZeroBurst { id: process.id });
        }
        Self::check_horizon(&processes)?;

        processes.sort_by_key(|p| p.arrival_time);
        for (seq, process) in processes.iter_mut().enumerate() {
            process.seq = seq;
            process.original_arrival_time = process.arrival_time;
        }

        Ok(Self { processes })
    }

    fn check_horizon(processes: &[Process]) -> SimResult<()> {
        let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
        processes
            .iter()
            .try_fold(last_arrival, |acc, p| acc.checked_add(p.burst_time))
            .and_then(|horizon| horizon.checked_mul(processes.len() as Ticks))
            .map(|_| ())
            .ok_or(SimError::Horizon)
    }

    pub fn from_triples(
        triples: impl IntoIterator<Item = (ProcessId, Ticks, Ticks)>,
    ) -> SimResult<Self> {
        Self::new(
            triples
                .into_iter()
                .map(|(id, arrival, burst)| Process::new(id, arrival, burst))
                .collect(),
        )
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    pub fn has_recurring_ids(&self) -> bool {
        let mut seen = FxHashSet::default();
        !self.processes.iter().all(|p| seen.insert(p.id))
    }
}
