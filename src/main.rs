use std::process;

use clap::Parser;
use env_logger::Env;

use pivot_experiment::experiment::run_experiment_on_worker;
use pivot_experiment::sampler::DEFAULT_SEED_BASE;
use pivot_experiment::{ConfigError, ExperimentConfig};

/// Computational experiment with the pivot element of a partitioning sort.
///
/// Sorts RUNS freshly generated inputs and reports the mean time, recursion count, exchange count
/// and initial sortedness.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Number of elements per input.
    len: usize,

    /// Number of trials to average over.
    runs: usize,

    /// Value distribution: uniform, exp, benford or cauchy.
    distribution: String,

    /// Initial order: regular, sorted or reversed.
    order: String,

    /// Percent of the elements to swap after ordering, 0-100.
    #[arg(allow_negative_numbers = true)]
    shuffle: i64,

    /// Percent of the elements to overwrite with a copy of another element, 0-100.
    #[arg(allow_negative_numbers = true)]
    twins: i64,

    /// Pivot method: 0 first, 1 random, 2 median, 3 adaptive. Names work as well.
    method: String,

    /// Trial `i` is seeded with `seed_base + i`.
    #[arg(long, default_value_t = DEFAULT_SEED_BASE)]
    seed_base: u64,

    /// Pin the trial thread to this core.
    #[arg(long)]
    pin_core: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> Result<ExperimentConfig, ConfigError> {
        let config = ExperimentConfig::from_args(
            self.len,
            self.runs,
            &self.distribution,
            &self.order,
            self.shuffle,
            self.twins,
            &self.method,
        )?;

        Ok(config
            .with_seed_base(self.seed_base)
            .with_pin_core(self.pin_core))
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json = cli.json;

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(err.exit_code());
        }
    };

    if !json {
        println!("{config}");
    }

    let report = match run_experiment_on_worker(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Failed to spawn trial thread: {err}");
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("Failed to serialize report: {err}");
                process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }
}
