/*!
 * Simulator Errors
 * Everything that can stop a run before the first dispatch
 */

use thiserror::Error;

use crate::core::ProcessId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("line {line}: expected 3 fields (id arrival burst), found {found}")]
    MalformedRecord { line: usize, found: usize },

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("process {id} has a zero burst time")]
    ZeroBurst { id: ProcessId },

    #[error("workload overflows the clock: latest arrival plus total burst, or its total-wait bound, exceeds u64")]
    Horizon,

    #[error("process list is empty; average waiting time is undefined")]
    EmptyWorkload,

    #[error("time quantum must be a positive integer, got {0}")]
    InvalidQuantum(u64),

    #[error("smoothing factor alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("initial burst estimate must be finite and non-negative, got {0}")]
    InvalidEstimate(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
