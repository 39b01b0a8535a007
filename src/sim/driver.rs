use tracing::{debug, info, info_span};

use super::metrics::Summary;
use crate::config::SimConfig;
use crate::core::{Observer, Schedule, Workload};
use crate::error::SimResult;
use crate::scheduler::{
    FcfsScheduler, Policy, RoundRobinScheduler, Scheduler, SjfScheduler, SrtfScheduler,
};

/// Runs policies against one immutable workload.
///
/// Every run builds its own ready set and remnants, so policies never observe
/// each other and repeating a run reproduces it exactly.
pub struct Sim {
    workload: Workload,
    fcfs: FcfsScheduler,
    round_robin: RoundRobinScheduler,
    srtf: SrtfScheduler,
    sjf: SjfScheduler,
    observer: Observer,
}

impl Sim {
    /// Validates every policy parameter before anything runs.
    pub fn new(workload: Workload, config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            workload,
            fcfs: FcfsScheduler,
            round_robin: RoundRobinScheduler::new(config.time_quantum)?,
            srtf: SrtfScheduler,
            sjf: SjfScheduler::new(config.alpha, config.initial_estimate)?,
            observer: Observer::new(),
        })
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn scheduler(&self, policy: Policy) -> &dyn Scheduler {
        match policy {
            Policy::Fcfs => &self.fcfs,
            Policy::RoundRobin => &self.round_robin,
            Policy::Srtf => &self.srtf,
            Policy::Sjf => &self.sjf,
        }
    }

    pub fn run(&mut self, policy: Policy) -> Schedule {
        let _span = info_span!("simulate", %policy).entered();
        info!(processes = self.workload.len(), "simulating {policy}");

        let schedule = self.scheduler(policy).schedule(&self.workload);
        self.observer.observe(&self.workload, &schedule);

        debug!(
            dispatches = schedule.events.len(),
            total_wait = schedule.total_wait,
            average_wait = schedule.average_waiting_time(),
            "{policy} finished"
        );
        schedule
    }

    /// Every policy in [`Policy::ALL`] order.
    pub fn run_all(&mut self) -> Vec<Schedule> {
        Policy::ALL.into_iter().map(|policy| self.run(policy)).collect()
    }

    pub fn summarize(&mut self) -> Vec<Summary> {
        self.run_all().iter().map(Summary::from).collect()
    }
}
