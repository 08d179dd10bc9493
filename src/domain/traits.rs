// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CsvGestureSource implements SampleSource
//   - A future binary/IDX reader could also implement it
//   - The dataset layer only sees SampleSource
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::sample::GestureSample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full collection of raw samples.
///
/// Implementations:
///   - CsvGestureSource → reads the label + 784-pixel CSV layout
pub trait SampleSource {
    /// Load every sample this source provides, in file order.
    fn load_all(&self) -> Result<Vec<GestureSample>>;
}
