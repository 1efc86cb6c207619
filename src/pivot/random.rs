use crate::sampler::RandomStream;

pivot_impl!("random");

#[inline]
fn choose_pivot(v: &[i32], rng: &mut RandomStream) -> i32 {
    v[rng.index(v.len())]
}
