use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Presentation order for `n` valid records.
///
/// The permutation depends only on `(seed, n)`. ChaCha8 is byte-stable
/// across platforms and releases (`StdRng` is documented as non-portable),
/// so the same seed replays the same order anywhere. Storage order is never
/// touched; this only drives traversal.
pub fn shuffled_indices(seed: u64, n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
