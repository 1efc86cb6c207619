//! Testbed for how pivot selection in a partitioning sort interacts with input distribution,
//! pre-existing order, near-sortedness and duplicate density.

pub mod error;
pub mod experiment;
pub mod measure;
pub mod patterns;
pub mod pivot;
pub mod quicksort;
pub mod sampler;
pub mod sortedness;

pub use error::ConfigError;
pub use experiment::{run_experiment, run_trial, ExperimentConfig, ExperimentReport, TrialResult};
pub use patterns::{generate, Order};
pub use pivot::{PivotMethod, PivotStrategy};
pub use quicksort::{sort_range, sort_with, SortStats};
pub use sampler::{Distribution, RandomStream};
pub use sortedness::sortedness;

/// Returns true if `v` is ascending or descending.
///
/// Either direction counts, the post-sort check does not care which way the result is ordered.
pub fn is_monotonic(v: &[i32]) -> bool {
    let mut ascending = true;
    let mut descending = true;

    for w in v.windows(2) {
        ascending &= w[0] <= w[1];
        descending &= w[0] >= w[1];

        if !ascending && !descending {
            return false;
        }
    }

    true
}
