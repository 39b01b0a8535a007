use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::metrics::Summary;
use crate::core::Schedule;
use crate::error::SimResult;

pub const SUMMARY_FILE: &str = "summary.json";

/// `(timestamp, id)` per line, then the average waiting time to two decimals.
pub fn render_schedule(schedule: &Schedule) -> String {
    let mut out = String::new();
    for event in &schedule.events {
        let _ = writeln!(out, "{event}");
    }
    let _ = writeln!(
        out,
        "average waiting time {:.2} ",
        schedule.average_waiting_time()
    );
    out
}

/// Writes `<POLICY>.txt` into `dir` and returns its path.
pub fn write_schedule(dir: impl AsRef<Path>, schedule: &Schedule) -> SimResult<PathBuf> {
    let path = dir.as_ref().join(format!("{}.txt", schedule.policy));
    fs::write(&path, render_schedule(schedule))?;
    info!(path = %path.display(), "wrote {} schedule", schedule.policy);
    Ok(path)
}

pub fn write_summary(dir: impl AsRef<Path>, summaries: &[Summary]) -> SimResult<PathBuf> {
    let path = dir.as_ref().join(SUMMARY_FILE);
    fs::write(&path, serde_json::to_string_pretty(summaries)?)?;
    info!(path = %path.display(), "wrote summary");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Workload;
    use crate::scheduler::{FcfsScheduler, Scheduler};

    #[test]
    fn renders_tuple_lines_and_rounded_average() {
        let workload = Workload::from_triples([(1, 0, 5), (2, 1, 3), (3, 2, 8)]).unwrap();
        let text = render_schedule(&FcfsScheduler.schedule(&workload));
        assert_eq!(text, "(0, 1)\n(5, 2)\n(8, 3)\naverage waiting time 3.33 \n");
    }
}
