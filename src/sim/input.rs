use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::core::{Process, Ticks, Workload};
use crate::error::{SimError, SimResult};

/// Parse `id arrival burst` records, one per line. Any line without exactly
/// three integer fields, blank lines included, aborts the whole parse. Ids may
/// be negative; arrival and burst times may not.
pub fn parse_processes(text: &str) -> SimResult<Workload> {
    let mut processes = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [id, arrival, burst] = fields[..] else {
            return Err(SimError::MalformedRecord {
                line: line_no,
                found: fields.len(),
            });
        };

        let burst: Ticks = parse_field(burst, "burst time", line_no)?;
        if burst == 0 {
            return Err(SimError::InvalidField {
                line: line_no,
                field: "burst time",
                value: "0".into(),
            });
        }

        processes.push(Process::new(
            parse_field(id, "process id", line_no)?,
            parse_field(arrival, "arrival time", line_no)?,
            burst,
        ));
    }

    debug!(records = processes.len(), "parsed input");
    Workload::new(processes)
}

pub fn read_processes(path: impl AsRef<Path>) -> SimResult<Workload> {
    parse_processes(&fs::read_to_string(path)?)
}

fn parse_field<T: FromStr>(raw: &str, field: &'static str, line: usize) -> SimResult<T> {
    raw.parse().map_err(|_| SimError::InvalidField {
        line,
        field,
        value: raw.to_string(),
    })
}
