// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw CSV file all the
// way to tensor batches on the compute device.
//
// The pipeline flows in this order:
//
//   sign_mnist CSV file
//       │
//       ▼
//   CsvGestureSource  → parses rows into raw samples
//       │
//       ▼
//   splitter          → seeded index permutation, train/val cut
//       │
//       ▼
//   TransformPipeline → per-phase augmentation + [0,1] scaling
//       │
//       ▼
//   GestureDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   GestureBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Parses the label + 784-pixel CSV layout into raw samples
pub mod loader;

/// Builds the deterministic train/validation index split
pub mod splitter;

/// Per-phase image preprocessing and augmentation
pub mod transform;

/// Implements Burn's Dataset trait for gesture samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
