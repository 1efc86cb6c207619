//! Generates experiment inputs. Values come from one of the [`Distribution`]s, and can then be
//! ordered, partially shuffled and seeded with duplicates.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;
use crate::sampler::{Distribution, RandomStream};

/// Upper bound of generated values, the lower bound is 0.
pub const MAX_VALUE: i32 = 1_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Regular,
    Sorted,
    Reversed,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::Regular, Order::Sorted, Order::Reversed];

    pub fn name(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Sorted => "sorted",
            Self::Reversed => "reversed",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.name() == s)
            .ok_or_else(|| ConfigError::InvalidOrder(s.to_owned()))
    }
}

// --- Public ---

/// Builds one experiment input of `len` values.
///
/// `shuffle_percent` and `twin_percent` are expected in 0..=100, they are not checked.
pub fn generate(
    len: usize,
    distribution: Distribution,
    order: Order,
    shuffle_percent: u8,
    twin_percent: u8,
    rng: &mut RandomStream,
) -> Vec<i32> {
    let mut v = random_values(len, distribution, rng);

    match order {
        // :.:.:.::
        Order::Regular => {}
        //     .:
        //   .:::
        // .:::::
        Order::Sorted => v.sort(),
        // :.
        // :::.
        // :::::.
        Order::Reversed => v.sort_by_key(|&e| Reverse(e)),
    }

    if shuffle_percent > 0 {
        shuffle_pairs(&mut v, percent_of(len, shuffle_percent), rng);
    }

    if twin_percent > 0 {
        plant_twins(&mut v, percent_of(len, twin_percent), rng);
    }

    v
}

pub fn random_values(len: usize, distribution: Distribution, rng: &mut RandomStream) -> Vec<i32> {
    (0..len)
        .map(|_| rng.sample(distribution, 0, MAX_VALUE))
        .collect()
}

/// Swaps `count` pairs of randomly chosen positions.
///
/// Both positions are drawn independently, so some swaps hit the same position twice and change
/// nothing.
pub fn shuffle_pairs(v: &mut [i32], count: usize, rng: &mut RandomStream) {
    //   .:         .:
    // .:::  ==>  .: ::.
    if v.is_empty() {
        return;
    }

    for _ in 0..count {
        let a = rng.index(v.len());
        let b = rng.index(v.len());
        v.swap(a, b);
    }
}

/// Overwrites `count` randomly chosen positions with the value of another randomly chosen
/// position.
///
/// Positions are drawn independently each time. A copy can land on its own source or duplicate a
/// value that was itself copied earlier.
pub fn plant_twins(v: &mut [i32], count: usize, rng: &mut RandomStream) {
    //     .:         ..:
    //   .:::  ==>  .::::
    // .:::::     ..:::::
    if v.is_empty() {
        return;
    }

    for _ in 0..count {
        let dst = rng.index(v.len());
        let src = rng.index(v.len());
        v[dst] = v[src];
    }
}

// --- Private ---

fn percent_of(len: usize, percent: u8) -> usize {
    len * percent as usize / 100
}
