//! In-place uniform permutation.

use rand::Rng;

/// Shuffle `items` in place: for each position `i`, swap it with a position
/// drawn uniformly from `[i, len - 1]`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let len = items.len();
    for i in 0..len {
        let j = rng.gen_range(i..len);
        items.swap(i, j);
    }
}

/// A shuffled `[0, n)` index list.
pub fn shuffled_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    shuffle(&mut order, rng);
    order
}
