/*!
 * Tracing Setup
 * One-time subscriber installation for the binary
 */

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const ENV_LOG_JSON: &str = "SCHED_SIM_LOG_JSON";

/// Install a global subscriber filtered by `RUST_LOG` (default `info`).
/// Set `SCHED_SIM_LOG_JSON=1` for JSON lines instead of human-readable output.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_LOG_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if use_json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
