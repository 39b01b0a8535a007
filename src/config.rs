/*!
 * Simulator Configuration
 * Defaults, optional JSON file, environment overrides, CLI positionals
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{SimError, SimResult};
use crate::scheduler::{
    BurstEstimator, DEFAULT_ALPHA, DEFAULT_INITIAL_ESTIMATE, DEFAULT_TIME_QUANTUM,
    RoundRobinScheduler,
};

pub const ENV_CONFIG: &str = "SCHED_SIM_CONFIG";
pub const ENV_INPUT: &str = "SCHED_SIM_INPUT";
pub const ENV_OUTPUT_DIR: &str = "SCHED_SIM_OUTPUT_DIR";
pub const ENV_QUANTUM: &str = "SCHED_SIM_QUANTUM";
pub const ENV_ALPHA: &str = "SCHED_SIM_ALPHA";
pub const ENV_INITIAL_ESTIMATE: &str = "SCHED_SIM_INITIAL_ESTIMATE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Round-Robin time slice.
    pub time_quantum: u64,
    /// SJF smoothing factor, weight of the most recent burst.
    pub alpha: f64,
    /// SJF prediction for an id's first burst.
    pub initial_estimate: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.txt"),
            output_dir: PathBuf::from("."),
            time_quantum: DEFAULT_TIME_QUANTUM,
            alpha: DEFAULT_ALPHA,
            initial_estimate: DEFAULT_INITIAL_ESTIMATE,
        }
    }
}

impl SimConfig {
    /// Defaults, then the file named by `SCHED_SIM_CONFIG`, then `SCHED_SIM_*`
    /// variables.
    pub fn load() -> SimResult<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> SimResult<()> {
        if let Some(input) = lookup(ENV_INPUT) {
            self.input = input.into();
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = dir.into();
        }
        if let Some(raw) = lookup(ENV_QUANTUM) {
            self.time_quantum = parse_env(ENV_QUANTUM, &raw)?;
        }
        if let Some(raw) = lookup(ENV_ALPHA) {
            self.alpha = parse_env(ENV_ALPHA, &raw)?;
        }
        if let Some(raw) = lookup(ENV_INITIAL_ESTIMATE) {
            self.initial_estimate = parse_env(ENV_INITIAL_ESTIMATE, &raw)?;
        }
        Ok(())
    }

    /// Positional `[input] [output_dir]`.
    pub fn apply_args<I: IntoIterator<Item = String>>(&mut self, args: I) -> SimResult<()> {
        let mut args = args.into_iter();
        if let Some(input) = args.next() {
            self.input = input.into();
        }
        if let Some(dir) = args.next() {
            self.output_dir = dir.into();
        }
        if let Some(extra) = args.next() {
            return Err(SimError::Config(format!("unexpected argument '{extra}'")));
        }
        Ok(())
    }

    pub fn validate(&self) -> SimResult<()> {
        RoundRobinScheduler::new(self.time_quantum)?;
        BurstEstimator::new(self.alpha, self.initial_estimate)?;
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> SimResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| SimError::Config(format!("{key}: cannot parse '{raw}'")))
}
