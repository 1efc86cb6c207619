//! Runs repeated, individually seeded trials of one input configuration and averages them.

use std::fmt;
use std::io;
use std::panic;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::error::ConfigError;
use crate::is_monotonic;
use crate::measure::{flush_cache, measure_duration, pin_thread_to_core};
use crate::patterns::{self, Order};
use crate::pivot::PivotMethod;
use crate::quicksort::{sort_with, SortStats};
use crate::sampler::{Distribution, RandomStream, DEFAULT_SEED_BASE};
use crate::sortedness::sortedness;

/// Stack reserved for the thread running the trials. The first element strategy on ordered input
/// recurses once per element.
pub const TRIAL_STACK_BYTES: usize = 512 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentConfig {
    pub len: usize,
    pub runs: usize,
    pub distribution: Distribution,
    pub order: Order,
    pub shuffle_percent: u8,
    pub twin_percent: u8,
    pub method: PivotMethod,
    pub seed_base: u64,
    pub pin_core: Option<usize>,
}

impl ExperimentConfig {
    /// A single run without perturbations.
    pub fn new(len: usize, distribution: Distribution, order: Order, method: PivotMethod) -> Self {
        Self {
            len,
            runs: 1,
            distribution,
            order,
            shuffle_percent: 0,
            twin_percent: 0,
            method,
            seed_base: DEFAULT_SEED_BASE,
            pin_core: None,
        }
    }

    /// Builds a configuration from the raw driver arguments. When several arguments are invalid,
    /// the first one in the order order, shuffle, twins, method, distribution, runs is reported.
    pub fn from_args(
        len: usize,
        runs: usize,
        distribution: &str,
        order: &str,
        shuffle_percent: i64,
        twin_percent: i64,
        method: &str,
    ) -> Result<Self, ConfigError> {
        let order = order.parse::<Order>()?;
        let shuffle_percent =
            to_percent(shuffle_percent).ok_or(ConfigError::InvalidShuffle(shuffle_percent))?;
        let twin_percent =
            to_percent(twin_percent).ok_or(ConfigError::InvalidTwins(twin_percent))?;
        let method = method.parse::<PivotMethod>()?;
        let distribution = distribution.parse::<Distribution>()?;

        let mut config = Self::new(len, distribution, order, method).with_runs(runs)?;
        config.shuffle_percent = shuffle_percent;
        config.twin_percent = twin_percent;

        Ok(config)
    }

    pub fn with_runs(mut self, runs: usize) -> Result<Self, ConfigError> {
        if runs == 0 {
            return Err(ConfigError::InvalidRuns(runs));
        }

        self.runs = runs;
        Ok(self)
    }

    pub fn with_shuffle_percent(mut self, percent: i64) -> Result<Self, ConfigError> {
        self.shuffle_percent = to_percent(percent).ok_or(ConfigError::InvalidShuffle(percent))?;
        Ok(self)
    }

    pub fn with_twin_percent(mut self, percent: i64) -> Result<Self, ConfigError> {
        self.twin_percent = to_percent(percent).ok_or(ConfigError::InvalidTwins(percent))?;
        Ok(self)
    }

    pub fn with_seed_base(mut self, seed_base: u64) -> Self {
        self.seed_base = seed_base;
        self
    }

    pub fn with_pin_core(mut self, pin_core: Option<usize>) -> Self {
        self.pin_core = pin_core;
        self
    }
}

impl fmt::Display for ExperimentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "N = {}", self.len)?;
        writeln!(f, "RUNS = {}", self.runs)?;
        writeln!(f, "dist = {}", self.distribution)?;
        writeln!(f, "order = {}", self.order)?;
        writeln!(f, "shuffle = {}", self.shuffle_percent)?;
        writeln!(f, "twins = {}", self.twin_percent)?;
        write!(f, "p_method = {}", self.method)
    }
}

fn to_percent(percent: i64) -> Option<u8> {
    (0..=100).contains(&percent).then_some(percent as u8)
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TrialResult {
    pub trial: usize,
    pub seed: u64,
    /// Sortedness degree of the generated input, before sorting.
    pub initial_sortedness: f64,
    pub stats: SortStats,
    /// Wall-clock time of the whole sort call.
    pub total_time: Duration,
    /// `total_time` without the time spent choosing pivots.
    pub partition_time: Duration,
    pub is_sorted: bool,
}

/// Generates, analyzes and sorts one input. The random stream is reseeded from the trial index, so
/// every trial can be reproduced on its own.
pub fn run_trial(config: &ExperimentConfig, trial: usize) -> TrialResult {
    let mut rng = RandomStream::for_trial(config.seed_base, trial);
    let seed = rng.seed();

    let mut v = patterns::generate(
        config.len,
        config.distribution,
        config.order,
        config.shuffle_percent,
        config.twin_percent,
        &mut rng,
    );

    let initial_sortedness = sortedness(&v);

    flush_cache();

    let (stats, total_time) = measure_duration(|| sort_with(config.method, &mut v, &mut rng));
    let partition_time = total_time.saturating_sub(stats.pivot_time);

    let is_sorted = is_monotonic(&v);
    if !is_sorted {
        log::warn!("Trial {trial} (seed {seed}): result is not sorted");
    }

    log::debug!(
        "Trial {trial} (seed {seed}): sortedness {initial_sortedness:.5}, recursions {}, \
         exchanges {}, pivot time {:?}, total time {total_time:?}",
        stats.recursions,
        stats.exchanges,
        stats.pivot_time,
    );

    TrialResult {
        trial,
        seed,
        initial_sortedness,
        stats,
        total_time,
        partition_time,
        is_sorted,
    }
}

/// Averages over all trials of an experiment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    /// Seconds per trial spent in the sort, pivot selection excluded.
    pub mean_partition_secs: f64,
    /// Truncated to an integer.
    pub mean_recursions: u64,
    /// Truncated to an integer.
    pub mean_exchanges: u64,
    pub mean_sortedness: f64,
    pub unsorted_trials: usize,
}

impl ExperimentReport {
    pub fn from_trials(
        config: ExperimentConfig,
        trials: impl IntoIterator<Item = TrialResult>,
    ) -> Self {
        let mut count = 0usize;
        let mut totals = SortStats::default();
        let mut partition_time = Duration::ZERO;
        let mut sortedness_sum = 0.0;
        let mut unsorted_trials = 0;

        for trial in trials {
            count += 1;
            totals += trial.stats;
            partition_time += trial.partition_time;
            sortedness_sum += trial.initial_sortedness;
            if !trial.is_sorted {
                unsorted_trials += 1;
            }
        }

        if count == 0 {
            return Self {
                config,
                mean_partition_secs: 0.0,
                mean_recursions: 0,
                mean_exchanges: 0,
                mean_sortedness: 0.0,
                unsorted_trials: 0,
            };
        }

        Self {
            config,
            mean_partition_secs: partition_time.as_secs_f64() / count as f64,
            mean_recursions: totals.recursions / count as u64,
            mean_exchanges: totals.exchanges / count as u64,
            mean_sortedness: sortedness_sum / count as f64,
            unsorted_trials,
        }
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean time               : {:.5} sec.", self.mean_partition_secs)?;
        writeln!(f, "Mean recursions         : {}", self.mean_recursions)?;
        writeln!(f, "Mean exchanges          : {}", self.mean_exchanges)?;
        write!(f, "Mean \"sortedness\"       : {:.5}", self.mean_sortedness)?;

        if self.unsorted_trials > 0 {
            write!(
                f,
                "\nUnsorted results        : {} of {}",
                self.unsorted_trials, self.config.runs
            )?;
        }

        Ok(())
    }
}

/// Runs all trials of `config` on the calling thread.
pub fn run_experiment(config: &ExperimentConfig) -> ExperimentReport {
    if let Some(core_id) = config.pin_core {
        pin_thread_to_core(core_id);
    }

    log::info!(
        "Running {} trials: len {}, {} {}, shuffle {}%, twins {}%, pivot {}",
        config.runs,
        config.len,
        config.distribution,
        config.order,
        config.shuffle_percent,
        config.twin_percent,
        config.method,
    );

    let trials = (0..config.runs).map(|trial| run_trial(config, trial));

    ExperimentReport::from_trials(config.clone(), trials)
}

/// Like [`run_experiment`], but on a dedicated thread with [`TRIAL_STACK_BYTES`] of stack. A panic
/// in a trial is resumed on the caller.
pub fn run_experiment_on_worker(config: &ExperimentConfig) -> io::Result<ExperimentReport> {
    let config = config.clone();

    let worker = thread::Builder::new()
        .name("trials".into())
        .stack_size(TRIAL_STACK_BYTES)
        .spawn(move || run_experiment(&config))?;

    match worker.join() {
        Ok(report) => Ok(report),
        Err(payload) => panic::resume_unwind(payload),
    }
}
