// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   config.rs     — YAML settings file parsing and validation.
//                   A broken or out-of-range configuration
//                   aborts startup before any data is touched.
//
//   checkpoint.rs — Saving and loading model weights with
//                   Burn's CompactRecorder, plus the JSON
//                   record of the run's hyperparameters.
//
//   metrics.rs    — Per-epoch metric rows appended to a
//                   run-scoped CSV for external visualization.
//
// Reference: Rust Book §7 (Modules), §9 (Error Handling)

/// YAML settings file loading and validation
pub mod config;

/// Best-model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
