//! True median, by sorting a copy of the range.

use crate::sampler::RandomStream;

pivot_impl!("median");

fn choose_pivot(v: &[i32], _rng: &mut RandomStream) -> i32 {
    median(v)
}

/// Median of `v`. For an even length it is the mean of the two central values, truncated toward
/// zero. The sum is formed in `i64` so it can't overflow.
pub fn median(v: &[i32]) -> i32 {
    let mut sorted = v.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        sorted[mid]
    } else {
        ((sorted[mid - 1] as i64 + sorted[mid] as i64) / 2) as i32
    }
}
