// ============================================================
// Layer 3 — GestureSample Domain Type
// ============================================================
// Represents one sign-language gesture image as it appears in
// the dataset file: a 28×28 single-channel pixel grid and an
// integer class id. Immutable once loaded — every later stage
// (transforms, batching) produces new values instead of
// mutating the sample.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// Image side length in pixels. Every sample is square.
pub const IMAGE_SIDE: usize = 28;

/// Number of pixels per image (28 × 28, one channel).
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Number of gesture classes in the dataset.
/// Letters A–Y excluding J and Z (those require motion).
pub const NUM_CLASSES: usize = 25;

/// One gesture image paired with its label.
///
/// `pixels` holds the 784 raw 8-bit values in row-major order,
/// exactly as read from the dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureSample {
    /// Raw pixel values, length [`IMAGE_PIXELS`]
    pub pixels: Vec<u8>,

    /// Class id in `0..NUM_CLASSES`
    pub label: usize,
}

impl GestureSample {
    /// Create a new sample. The caller is responsible for having
    /// validated pixel count and label range at the parse boundary.
    pub fn new(pixels: Vec<u8>, label: usize) -> Self {
        Self { pixels, label }
    }
}
