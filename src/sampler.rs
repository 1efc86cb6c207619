//! Pseudo-random integers drawn from the distributions the experiments are run with.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use serde::Serialize;

use crate::error::ConfigError;

/// Seeds are derived from this base plus the trial index, unless configured otherwise.
pub const DEFAULT_SEED_BASE: u64 = 200;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    Uniform,
    #[serde(rename = "exp")]
    Exponential,
    Benford,
    Cauchy,
}

impl Distribution {
    pub const ALL: [Distribution; 4] = [
        Distribution::Uniform,
        Distribution::Exponential,
        Distribution::Benford,
        Distribution::Cauchy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Exponential => "exp",
            Self::Benford => "benford",
            Self::Cauchy => "cauchy",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Self::Uniform),
            "exp" | "exponential" => Ok(Self::Exponential),
            "benford" => Ok(Self::Benford),
            "cauchy" => Ok(Self::Cauchy),
            _ => Err(ConfigError::InvalidDistribution(s.to_owned())),
        }
    }
}

/// The one source of randomness for a trial. Input generation and random pivot selection both
/// draw from it, so a trial is fully reproducible from its seed.
#[derive(Clone, Debug)]
pub struct RandomStream {
    rng: StdRng,
    seed: u64,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn for_trial(seed_base: u64, trial: usize) -> Self {
        Self::new(seed_base.wrapping_add(trial as u64))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in [0, 1). Every other draw is built on top of this.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform integer in [min, max], by scaling a [`Self::unit`] draw.
    #[inline]
    pub fn uniform(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min + 1) as f64;
        min + (self.unit() * span) as i64
    }

    /// Uniform index in [0, len). `len` must not be zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.uniform(0, len as i64 - 1) as usize
    }

    /// Draws a value in [min, max] following `distribution`.
    ///
    /// Everything except `Uniform` is rejection sampled into the range without an iteration cap.
    /// An empty target range never terminates.
    pub fn sample(&mut self, distribution: Distribution, min: i32, max: i32) -> i32 {
        match distribution {
            Distribution::Uniform => self.uniform(min as i64, max as i64) as i32,
            Distribution::Exponential => self.exponential(min, max),
            Distribution::Benford => self.benford(min, max),
            Distribution::Cauchy => self.cauchy(min, max),
        }
    }

    fn exponential(&mut self, min: i32, max: i32) -> i32 {
        // Rate chosen so that max sits six orders of magnitude down the tail.
        let lambda = 1e6_f64.ln() / max as f64;

        self.reject_into(min, max, |u| -(1.0 - u).ln() / lambda)
    }

    fn benford(&mut self, min: i32, max: i32) -> i32 {
        let min = min.max(1);
        let log_min = (min as f64).ln();
        let log_max = (max as f64).ln();

        self.reject_into(min, max, |u| (u * (log_max - log_min) + log_min).exp())
    }

    fn cauchy(&mut self, min: i32, max: i32) -> i32 {
        let x0 = max as f64 / 2.0;
        let gamma = max as f64 / 6.0;

        self.reject_into(min, max, |u| x0 + gamma * (PI * (u - 0.5)).tan())
    }

    #[inline]
    fn reject_into(&mut self, min: i32, max: i32, inverse_cdf: impl Fn(f64) -> f64) -> i32 {
        let (min, max) = (min as f64, max as f64);

        loop {
            let val = inverse_cdf(self.unit());
            if val >= min && val <= max {
                return val as i32;
            }
        }
    }
}
