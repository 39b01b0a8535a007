use rustc_hash::FxHashMap;
use std::cmp::Ordering;

use crate::core::{ProcessId, Ticks};
use crate::error::{SimError, SimResult};

/// Predicted burst length. Ordered with `f64::total_cmp` so it can rank a
/// priority queue.
#[derive(Debug, Clone, Copy)]
pub struct Estimate(pub f64);

impl PartialEq for Estimate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Estimate {}

impl Ord for Estimate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Estimate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Exponential-average burst predictor, one estimate per process id:
///
/// `next = alpha * actual + (1 - alpha) * previous`
///
/// An id seen for the first time is predicted at `initial`. When every id in a
/// workload occurs once, every prediction is `initial`; that is the expected
/// outcome for single-burst inputs, not a defect.
#[derive(Debug, Clone)]
pub struct BurstEstimator {
    alpha: f64,
    initial: f64,
    estimates: FxHashMap<ProcessId, f64>,
}

impl BurstEstimator {
    pub fn new(alpha: f64, initial: f64) -> SimResult<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(SimError::InvalidAlpha(alpha));
        }
        if !initial.is_finite() || initial < 0.0 {
            return Err(SimError::InvalidEstimate(initial));
        }
        Ok(Self {
            alpha,
            initial,
            estimates: FxHashMap::default(),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn predict(&self, id: ProcessId) -> Estimate {
        Estimate(self.estimates.get(&id).copied().unwrap_or(self.initial))
    }

    /// Fold an observed burst into the estimate for `id` and return the new one.
    pub fn observe(&mut self, id: ProcessId, actual: Ticks) -> Estimate {
        let previous = self.predict(id).0;
        let next = self.alpha * actual as f64 + (1.0 - self.alpha) * previous;
        self.estimates.insert(id, next);
        Estimate(next)
    }
}
