//! Pseudo-random selection utilities.
//!
//! Randomness is injected through [`rand_core::RngCore`] so the device can
//! supply its hardware RNG while tests run on seeded generators.

use rand_core::RngCore;

/// Draws an index uniformly distributed in `[0, bound)`.
///
/// Returns 0 when `bound` is 0 or 1. The modulo bias is negligible for the
/// small bounds used here (pixel and section counts).
pub fn random_below<R: RngCore>(rng: &mut R, bound: usize) -> usize {
    if bound <= 1 {
        return 0;
    }
    rng.next_u32() as usize % bound
}

/// Shuffles a slice in place with the Fisher-Yates algorithm.
///
/// For `i` from the last index down to 1, draws `j` uniformly in `[0, i]`
/// and swaps elements `i` and `j`, producing an unbiased permutation.
pub fn fisher_yates<T, R: RngCore>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = random_below(rng, i + 1);
        items.swap(i, j);
    }
}
