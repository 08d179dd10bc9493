// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types and traits that define the core concepts of
// the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no tensor backend needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A raw gesture image with its class label
pub mod sample;

// Which data subset and transform pipeline apply
pub mod phase;

// Core abstractions (traits) that other layers implement
pub mod traits;
