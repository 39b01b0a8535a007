pub mod driver;
pub mod generate;
pub mod input;
pub mod metrics;
pub mod output;

pub use driver::Sim;
pub use generate::{BernoulliParams, bernoulli_processes, render_processes};
pub use input::{parse_processes, read_processes};
pub use metrics::Summary;
pub use output::{render_schedule, write_schedule, write_summary};
