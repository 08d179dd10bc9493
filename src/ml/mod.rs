// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the model architectures and the training
// loop. Together with the data layer's dataset/batcher it is
// the only place Burn framework types appear.
//
// What's in this layer:
//
//   models/      — The four classifier architectures behind the
//                  GestureModel trait, plus the name registry
//                  the CLI exposes
//
//   trainer.rs   — The epoch/phase training state machine:
//                  forward pass, loss, backward pass, SGD step,
//                  LR decay, accuracy accounting, best-model
//                  snapshotting, metric emission
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// The four classifier architectures and their factory
pub mod models;

/// Full training loop with validation and best-model tracking
pub mod trainer;
