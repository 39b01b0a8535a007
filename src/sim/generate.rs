use rand::prelude::*;

use crate::core::{Process, ProcessId, Ticks};

/// Parameters for [`bernoulli_processes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
}

impl Default for BernoulliParams {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
        }
    }
}

/// Seeded random workload: at each tick a process arrives with probability
/// `p_arrival`, and is short with probability `p_short`. Ids count up from 1
/// in arrival order.
pub fn bernoulli_processes(params: BernoulliParams, seed: u64) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let burst = if rng.random::<f64>() < params.p_short {
                params.short_burst
            } else {
                params.long_burst
            };

            processes.push(Process::new(processes.len() as ProcessId + 1, t, burst));
        }
    }

    processes
}

/// Input-file rendering of `processes`, one `id arrival burst` line each.
pub fn render_processes(processes: &[Process]) -> String {
    processes
        .iter()
        .map(|p| format!("{} {} {}\n", p.id, p.arrival_time, p.burst_time))
        .collect()
}
