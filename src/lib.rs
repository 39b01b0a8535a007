pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;
pub mod telemetry;

pub use config::SimConfig;
pub use crate::core::{Process, ProcessOutcome, Schedule, ScheduleEvent, Workload};
pub use error::{SimError, SimResult};
pub use scheduler::{Policy, Scheduler};
pub use sim::{Sim, Summary};
