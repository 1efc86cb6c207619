//! Pivot selection strategies consumed by the partitioning sort.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::ConfigError;
use crate::measure::measure_duration;
use crate::sampler::RandomStream;

pub trait PivotStrategy {
    fn name() -> String;

    /// Picks the comparison value for partitioning `v`. `v` must not be empty.
    fn choose_pivot(v: &[i32], rng: &mut RandomStream) -> i32;
}

macro_rules! pivot_impl {
    ($name:expr) => {
        pub struct PivotImpl;

        impl crate::pivot::PivotStrategy for PivotImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn choose_pivot(v: &[i32], rng: &mut crate::sampler::RandomStream) -> i32 {
                choose_pivot(v, rng)
            }
        }
    };
}

pub mod adaptive;
pub mod first;
pub mod median;
pub mod random;

/// Chooses a pivot for `v` and reports how long that took, so the caller can account for it
/// separately from the partitioning work.
#[inline]
pub fn select_pivot<P: PivotStrategy>(v: &[i32], rng: &mut RandomStream) -> (i32, Duration) {
    measure_duration(|| P::choose_pivot(v, rng))
}

/// Runtime tag for the strategies, as selected on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotMethod {
    First,
    Random,
    Median,
    Adaptive,
}

impl PivotMethod {
    pub const ALL: [PivotMethod; 4] = [
        PivotMethod::First,
        PivotMethod::Random,
        PivotMethod::Median,
        PivotMethod::Adaptive,
    ];

    pub fn id(self) -> u8 {
        match self {
            Self::First => 0,
            Self::Random => 1,
            Self::Median => 2,
            Self::Adaptive => 3,
        }
    }

    pub fn from_id(id: i64) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|method| method.id() as i64 == id)
            .ok_or_else(|| ConfigError::InvalidPivotMethod(id.to_string()))
    }

    pub fn name(self) -> String {
        match self {
            Self::First => first::PivotImpl::name(),
            Self::Random => random::PivotImpl::name(),
            Self::Median => median::PivotImpl::name(),
            Self::Adaptive => adaptive::PivotImpl::name(),
        }
    }

    pub fn select_pivot(self, v: &[i32], rng: &mut RandomStream) -> (i32, Duration) {
        match self {
            Self::First => select_pivot::<first::PivotImpl>(v, rng),
            Self::Random => select_pivot::<random::PivotImpl>(v, rng),
            Self::Median => select_pivot::<median::PivotImpl>(v, rng),
            Self::Adaptive => select_pivot::<adaptive::PivotImpl>(v, rng),
        }
    }
}

impl fmt::Display for PivotMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

impl FromStr for PivotMethod {
    type Err = ConfigError;

    /// Accepts the numeric id as well as the strategy name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<i64>() {
            return Self::from_id(id);
        }

        Self::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| ConfigError::InvalidPivotMethod(s.to_owned()))
    }
}
