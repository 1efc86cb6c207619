//! Median for ranges that are mostly ordered in either direction, random otherwise.
//!
//! The sortedness analysis is quadratic and redone for every sub-range. That cost is part of what
//! the experiment measures.

use crate::pivot::{median, random, PivotStrategy};
use crate::sampler::RandomStream;
use crate::sortedness::sortedness;

/// Above this sortedness degree the median is used.
pub const SORTEDNESS_THRESHOLD: f64 = 0.749;

pivot_impl!("adaptive");

fn choose_pivot(v: &[i32], rng: &mut RandomStream) -> i32 {
    if sortedness(v) > SORTEDNESS_THRESHOLD {
        median::median(v)
    } else {
        random::PivotImpl::choose_pivot(v, rng)
    }
}
