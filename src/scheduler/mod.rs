pub mod estimator;
pub mod fcfs;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::{Schedule, Workload};
use crate::error::SimError;
pub use estimator::{BurstEstimator, Estimate};
pub use fcfs::FcfsScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;
pub use srtf::SrtfScheduler;

pub const DEFAULT_TIME_QUANTUM: u64 = 2;
pub const DEFAULT_ALPHA: f64 = 0.5;
pub const DEFAULT_INITIAL_ESTIMATE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    RoundRobin,
    Srtf,
    Sjf,
}

impl Policy {
    /// Run order used by the driver and the CLI.
    pub const ALL: [Policy; 4] = [Policy::Fcfs, Policy::RoundRobin, Policy::Srtf, Policy::Sjf];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::RoundRobin => "RR",
            Self::Srtf => "SRTF",
            Self::Sjf => "SJF",
        }
    }

    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin | Self::Srtf)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "srtf" => Ok(Self::Srtf),
            "sjf" => Ok(Self::Sjf),
            _ => Err(SimError::Config(format!(
                "invalid policy '{s}'. Valid: fcfs, rr, srtf, sjf"
            ))),
        }
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A scheduling discipline: a pure function from a workload to its schedule.
///
/// Implementations hold only validated parameters. All per-run state (clock,
/// ready set, remnants) lives inside `schedule`, so one scheduler can be run
/// any number of times and always yields the same result.
pub trait Scheduler {
    fn policy(&self) -> Policy;

    fn schedule(&self, workload: &Workload) -> Schedule;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(policy.as_str().parse::<Policy>().unwrap(), policy);
        }
        assert_eq!("round_robin".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert!("lottery".parse::<Policy>().is_err());
    }

    #[test]
    fn policy_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Policy::Srtf).unwrap(), "\"SRTF\"");
    }
}
