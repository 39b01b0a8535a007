use keyed_priority_queue::KeyedPriorityQueue;
use slotmap::SlotMap;
use std::cmp::Ordering;
use std::collections::VecDeque;

use super::state::{Process, ProcessKey, Ticks};

/// Composite ordering key for priority ready sets.
///
/// Lower `value` wins, then earlier original arrival, then earlier input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank<R> {
    pub value: R,
    pub original_arrival: Ticks,
    pub seq: usize,
}

impl<R> Rank<R> {
    pub fn of(process: &Process, value: R) -> Self {
        Self {
            value,
            original_arrival: process.original_arrival_time,
            seq: process.seq,
        }
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl<R: Ord> Ord for Rank<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        (&other.value, other.original_arrival, other.seq).cmp(&(
            &self.value,
            self.original_arrival,
            self.seq,
        ))
    }
}

impl<R: Ord> PartialOrd for Rank<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plain arrival-ordered queue used by Round-Robin.
#[derive(Debug, Default)]
pub struct FifoReadySet {
    processes: VecDeque<Process>,
}

impl FifoReadySet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            processes: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, process: Process) {
        self.processes.push_back(process);
    }

    pub fn pop(&mut self) -> Option<Process> {
        self.processes.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

/// Ready set ordered by a policy-specific [`Rank`].
///
/// Records live in an arena; the queue only holds their keys. Replacing a
/// preempted process means popping its key and inserting the remnant as a new
/// entry, never editing a queued record.
#[derive(Debug)]
pub struct PriorityReadySet<R: Ord> {
    arena: SlotMap<ProcessKey, Process>,
    queue: KeyedPriorityQueue<ProcessKey, Rank<R>>,
}

impl<R: Ord> PriorityReadySet<R> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotMap::with_capacity_and_key(capacity),
            queue: KeyedPriorityQueue::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, process: Process, value: R) -> ProcessKey {
        let key = self.arena.insert(process);
        self.queue.push(key, Rank::of(&process, value));
        key
    }

    pub fn pop_min(&mut self) -> Option<Process> {
        let (key, _) = self.queue.pop()?;
        let process = self.arena.remove(key);
        debug_assert!(process.is_some(), "Ready entry {key:?} missing from arena");
        process
    }

    /// Re-rank every queued record for which `rank` yields a new value.
    pub fn rerank(&mut self, mut rank: impl FnMut(&Process) -> Option<R>) -> usize {
        let mut updated = 0;
        for (key, process) in &self.arena {
            if let Some(value) = rank(process) {
                let replaced = self.queue.set_priority(&key, Rank::of(process, value));
                debug_assert!(replaced.is_ok(), "Ready entry {key:?} missing from queue");
                updated += 1;
            }
        }
        updated
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Cursor over the not-yet-admitted tail of a sorted workload.
#[derive(Debug)]
pub struct Arrivals<'a> {
    pending: &'a [Process],
    next: usize,
}

impl<'a> Arrivals<'a> {
    pub fn new(pending: &'a [Process]) -> Self {
        Self { pending, next: 0 }
    }

    pub fn peek(&self) -> Option<&'a Process> {
        self.pending.get(self.next)
    }

    pub fn pop(&mut self) -> Option<Process> {
        let process = *self.peek()?;
        self.next += 1;
        Some(process)
    }

    /// Next process whose arrival is at or before `now`.
    pub fn pop_arrived(&mut self, now: Ticks) -> Option<Process> {
        self.pop_if(|p| p.arrival_time <= now)
    }

    /// Next process arriving strictly before `deadline`.
    pub fn pop_before(&mut self, deadline: Ticks) -> Option<Process> {
        self.pop_if(|p| p.arrival_time < deadline)
    }

    fn pop_if(&mut self, admit: impl FnOnce(&Process) -> bool) -> Option<Process> {
        if admit(self.peek()?) { self.pop() } else { None }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.pending.len()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len() - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Workload;

    #[test]
    fn priority_set_breaks_ties_by_arrival_then_input_order() {
        let workload = Workload::from_triples([(1, 0, 4), (2, 1, 4), (3, 1, 4), (4, 2, 1)]).unwrap();
        let mut ready = PriorityReadySet::with_capacity(workload.len());
        for process in workload.iter().rev() {
            ready.insert(*process, process.burst_time);
        }

        let order: Vec<_> = std::iter::from_fn(|| ready.pop_min()).map(|p| p.id).collect();
        assert_eq!(order, vec![4, 1, 2, 3]);
        assert!(ready.is_empty());
    }

    #[test]
    fn rerank_moves_matching_entries() {
        let workload = Workload::from_triples([(1, 0, 1), (2, 0, 1), (1, 3, 1)]).unwrap();
        let mut ready = PriorityReadySet::with_capacity(workload.len());
        for process in workload.iter() {
            ready.insert(*process, 10u64);
        }

        assert_eq!(ready.rerank(|p| (p.id == 1).then_some(2)), 2);
        let order: Vec<_> = std::iter::from_fn(|| ready.pop_min()).map(|p| p.seq).collect();
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn arrivals_cursor_respects_bounds() {
        let workload = Workload::from_triples([(1, 0, 1), (2, 3, 1), (3, 5, 1)]).unwrap();
        let mut arrivals = Arrivals::new(workload.processes());

        assert_eq!(arrivals.pop_arrived(0).map(|p| p.id), Some(1));
        assert_eq!(arrivals.pop_arrived(2), None);
        assert_eq!(arrivals.pop_before(3), None);
        assert_eq!(arrivals.pop_before(4).map(|p| p.id), Some(2));
        assert_eq!(arrivals.remaining(), 1);
        assert_eq!(arrivals.pop().map(|p| p.id), Some(3));
        assert!(arrivals.is_exhausted());
    }

    #[test]
    fn fifo_preserves_insertion_order() {
        let workload = Workload::from_triples([(5, 0, 1), (6, 0, 1)]).unwrap();
        let mut ready = FifoReadySet::with_capacity(2);
        ready.push(workload.processes()[1]);
        ready.push(workload.processes()[0]);
        assert!(!ready.is_empty());
        assert_eq!(ready.pop().map(|p| p.id), Some(6));
        assert_eq!(ready.pop().map(|p| p.id), Some(5));
        assert!(ready.pop().is_none());
    }
}
