//! Recursive quicksort with a two pointer Hoare partition and pluggable pivot selection.

use std::ops::AddAssign;
use std::time::Duration;

use serde::Serialize;

use crate::pivot::{adaptive, first, median, random, select_pivot, PivotMethod, PivotStrategy};
use crate::sampler::RandomStream;

/// Work done by one top-level sort call, accumulated over its whole recursion tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SortStats {
    /// Sort calls on ranges of two or more elements.
    pub recursions: u64,
    /// Element swaps performed by partitioning, self-swaps included.
    pub exchanges: u64,
    /// Time spent choosing pivots.
    pub pivot_time: Duration,
}

impl AddAssign for SortStats {
    fn add_assign(&mut self, rhs: Self) {
        self.recursions += rhs.recursions;
        self.exchanges += rhs.exchanges;
        self.pivot_time += rhs.pivot_time;
    }
}

/// Sorts `v` ascending in place, choosing every pivot with `P`.
///
/// Recursion depth follows partition balance and is not limited. A degenerate pivot choice on
/// adversarial input recurses once per element.
pub fn sort<P: PivotStrategy>(v: &mut [i32], rng: &mut RandomStream, stats: &mut SortStats) {
    let len = v.len();
    if len < 2 {
        return;
    }

    stats.recursions += 1;

    // The pivot is read before this call changes anything in `v`.
    let (pivot, pivot_time) = select_pivot::<P>(v, rng);
    stats.pivot_time += pivot_time;

    let (high_end, low) = partition(v, pivot, stats);

    if high_end > 1 {
        sort::<P>(&mut v[..high_end], rng, stats);
    }

    if low + 1 < len {
        sort::<P>(&mut v[low..], rng, stats);
    }
}

/// Partitions `v` around `pivot` and returns `(high_end, low)` where the pointers crossed.
/// Afterwards every element in `v[..high_end]` is `<= pivot` and every element in `v[low..]` is
/// `>= pivot`.
///
/// `pivot` must lie within the value range of `v`. Both scans stop at an element on the other side
/// of the pivot, so they stay in bounds and each side is strictly shorter than `v`.
fn partition(v: &mut [i32], pivot: i32, stats: &mut SortStats) -> (usize, usize) {
    let mut l = 0;
    // One past the `high` pointer, so it never has to go below zero.
    let mut r = v.len();

    while l < r {
        while v[l] < pivot {
            l += 1;
        }

        while v[r - 1] > pivot {
            r -= 1;
        }

        if l < r {
            r -= 1;
            v.swap(l, r);
            l += 1;
            stats.exchanges += 1;
        }
    }

    (r, l)
}

/// Sorts `v` with the strategy tagged by `method`, returning fresh statistics for the call.
pub fn sort_with(method: PivotMethod, v: &mut [i32], rng: &mut RandomStream) -> SortStats {
    let mut stats = SortStats::default();

    match method {
        PivotMethod::First => sort::<first::PivotImpl>(v, rng, &mut stats),
        PivotMethod::Random => sort::<random::PivotImpl>(v, rng, &mut stats),
        PivotMethod::Median => sort::<median::PivotImpl>(v, rng, &mut stats),
        PivotMethod::Adaptive => sort::<adaptive::PivotImpl>(v, rng, &mut stats),
    }

    stats
}

/// Sorts the inclusive index range `start..=end` of `v`. Nothing happens for `start >= end`.
pub fn sort_range(
    v: &mut [i32],
    start: usize,
    end: usize,
    method: PivotMethod,
    rng: &mut RandomStream,
) -> SortStats {
    if start >= end {
        return SortStats::default();
    }

    sort_with(method, &mut v[start..=end], rng)
}
