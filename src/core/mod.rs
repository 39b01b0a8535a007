pub mod event;
pub mod observer;
pub mod ready;
pub mod state;

pub use event::{ProcessOutcome, Recorder, Schedule, ScheduleEvent};
pub use observer::Observer;
pub use ready::{Arrivals, FifoReadySet, PriorityReadySet, Rank};
pub use state::{Process, ProcessId, ProcessKey, Ticks, Workload};
