// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Splits the full row-index range into two disjoint segments:
//   - Training set:   used to update model weights
//   - Validation set: used to measure performance on unseen data
//
// The split works on indices, not samples, so the dataset can
// select its subset without copying rows it will never serve.
// The permutation uses a seeded StdRng: for a fixed seed the
// partition is identical across runs, which makes experiments
// comparable and the split testable.
//
// Cut point: `(1 - val_split) * N`, truncated. Train takes the
// first segment, validation the remainder. With shuffle off the
// permutation is the identity and the file order decides the
// segments.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// the standard unbiased shuffle algorithm.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Seed used across the crate for every reproducible random choice.
pub const SPLIT_SEED: u64 = 42;

/// Build the (train, validation) index partition over `0..len`.
///
/// # Arguments
/// * `len`       - Total number of samples
/// * `val_split` - Proportion held out for validation, e.g. 0.25
/// * `shuffle`   - Whether to permute indices before cutting
/// * `seed`      - RNG seed for the permutation
///
/// # Returns
/// A tuple (train_indices, val_indices); together they cover
/// `0..len` exactly once.
pub fn train_val_indices(
    len: usize,
    val_split: f64,
    shuffle: bool,
    seed: u64,
) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..len).collect();

    if shuffle {
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    }

    // e.g. 100 samples, val_split 0.25 → first 75 indices train
    let cut = ((1.0 - val_split) * len as f64) as usize;
    let cut = cut.min(len);

    // split_off(n) removes elements [n..] and returns them
    let val = indices.split_off(cut);

    tracing::debug!(
        "Index split: {} training, {} validation (seed {seed}, shuffle {shuffle})",
        indices.len(),
        val.len(),
    );

    (indices, val)
}
