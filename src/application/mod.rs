// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a training run.
//
// Rules for this layer:
//   - No ML math or model internals here
//   - No argument parsing here (that's Layer 1)
//   - No direct tensor or file-format code (Layers 4–6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// The training workflow
pub mod train_use_case;
