use anyhow::{Context, Result, bail};
use sched_sim::sim::{self, BernoulliParams, Summary};
use sched_sim::telemetry::init_tracing;
use sched_sim::{Policy, Sim, SimConfig};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1).peekable();
    if args.peek().map(String::as_str) == Some("generate") {
        args.next();
        return generate(args);
    }

    let mut config = SimConfig::load().context("loading configuration")?;
    config.apply_args(args)?;
    config.validate()?;

    let workload = sim::read_processes(&config.input)
        .with_context(|| format!("reading {}", config.input.display()))?;
    info!(processes = workload.len(), "input loaded");
    for process in workload.iter() {
        info!(
            id = process.id,
            arrival = process.arrival_time,
            burst = process.burst_time,
            "process"
        );
    }

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let mut simulator = Sim::new(workload, &config)?;
    let mut summaries = Vec::with_capacity(Policy::ALL.len());
    for policy in Policy::ALL {
        let schedule = simulator.run(policy);
        sim::write_schedule(&config.output_dir, &schedule)
            .with_context(|| format!("writing {policy} results"))?;
        info!(
            "{policy}: average waiting time {:.2}",
            schedule.average_waiting_time()
        );
        summaries.push(Summary::from(&schedule));
    }
    sim::write_summary(&config.output_dir, &summaries).context("writing summary")?;

    Ok(())
}

/// `generate [ticks] [seed]`: print a random workload in the input format.
fn generate(mut args: impl Iterator<Item = String>) -> Result<()> {
    let mut params = BernoulliParams::default();
    if let Some(ticks) = args.next() {
        params.ticks = ticks.parse().with_context(|| format!("invalid tick count '{ticks}'"))?;
    }
    let seed = match args.next() {
        Some(seed) => seed.parse().with_context(|| format!("invalid seed '{seed}'"))?,
        None => 0,
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument '{extra}'");
    }

    let processes = sim::bernoulli_processes(params, seed);
    info!(processes = processes.len(), seed, "generated workload");
    print!("{}", sim::render_processes(&processes));
    Ok(())
}
