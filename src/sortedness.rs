//! Quantifies how close a range already is to monotonic, in either direction.

/// Pairwise comparison tally over all index pairs `i < j` of a range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InversionCount {
    /// Pairs with `v[i] > v[j]`, out of order for ascending.
    pub ascending_violations: u64,
    /// Pairs with `v[i] < v[j]`, out of order for descending.
    pub descending_violations: u64,
}

impl InversionCount {
    /// Pairs that are not ties.
    pub fn ordered_pairs(&self) -> u64 {
        self.ascending_violations + self.descending_violations
    }
}

/// Counts the ordered pairs of `v` in O(n^2). Ties are counted in neither direction.
pub fn count_inversions(v: &[i32]) -> InversionCount {
    let mut count = InversionCount::default();

    for (i, a) in v.iter().enumerate() {
        for b in &v[(i + 1)..] {
            if a > b {
                count.ascending_violations += 1;
            } else if a < b {
                count.descending_violations += 1;
            }
        }
    }

    count
}

/// Returns the sortedness degree of `v` in [0, 1].
///
/// That is the share of non-tie pairs consistent with whichever of ascending or descending order
/// fits better. Fewer than two elements yield exactly 1.0, a range with only ties yields exactly
/// 0.0.
///
/// The analysis runs on a private copy, `v` is never touched.
pub fn sortedness(v: &[i32]) -> f64 {
    if v.len() < 2 {
        return 1.0;
    }

    // Copying the range belongs to the analysis cost the adaptive pivot is measured with.
    let snapshot = v.to_vec();
    let count = count_inversions(&snapshot);

    let total = count.ordered_pairs();
    if total == 0 {
        return 0.0;
    }

    let consistent = (total - count.ascending_violations).max(total - count.descending_violations);

    consistent as f64 / total as f64
}
