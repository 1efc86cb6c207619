//! Always the leading element. Quadratic on already ordered input, which is the point.

use crate::sampler::RandomStream;

pivot_impl!("first");

#[inline]
fn choose_pivot(v: &[i32], _rng: &mut RandomStream) -> i32 {
    v[0]
}
