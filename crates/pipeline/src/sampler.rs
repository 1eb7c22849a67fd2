//! Uniform random sampling without replacement.

use rand::Rng;
use rand::seq::index;

/// Draw `min(k, pool.len())` distinct items from `pool`, uniformly at random.
///
/// The returned order is itself random. No position of `pool` is picked twice,
/// so a pool without duplicates yields a sample without duplicates.
pub fn sample<T: Clone, R: Rng + ?Sized>(pool: &[T], k: usize, rng: &mut R) -> Vec<T> {
    let amount = k.min(pool.len());
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}
