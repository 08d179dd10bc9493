// ============================================================
// Layer 5 — Model Contract and Registry
// ============================================================
// Every architecture satisfies one capability contract,
// expressed as the GestureModel trait: take a batch of
// single-channel 28×28 images, return one 25-way logit vector
// per sample. The trainer is written against this trait only,
// so the four architectures are interchangeable.
//
// The registry is a plain enum of names. Each dispatch site
// constructs a FRESH model from its config; no instance is
// shared or reused, so no gradient or normalization state can
// leak between runs.
//
// Reference: Rust Book §10 (Traits), Burn Book §3

use burn::{module::Module, prelude::*};

pub mod cnn;
pub mod resnet;
pub mod simple_cnn;
pub mod squeezenet;

pub use cnn::{GestureCnn, GestureCnnConfig};
pub use resnet::{ResNet18, ResNet18Config};
pub use simple_cnn::{SimpleCnn, SimpleCnnConfig};
pub use squeezenet::{SqueezeNet, SqueezeNetConfig};

// ─── GestureModel ─────────────────────────────────────────────────────────────
/// Capability contract all four architectures satisfy.
pub trait GestureModel<B: Backend>: Module<B> {
    /// images [batch, 1, 28, 28] → class logits [batch, 25]
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2>;
}

// ─── ModelKind ────────────────────────────────────────────────────────────────
/// The four registered architecture names, as accepted by
/// `--model` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ModelKind {
    /// Two same-padded conv/pool stages with a two-layer head
    CnnModel,

    /// Minimal LeNet-style stack
    SimpleCnn,

    /// ResNet-18 adapted to 1 input channel and 25 classes
    Resnet,

    /// Fire-module network adapted to 28×28 single-channel input
    Squeezenet,
}

impl ModelKind {
    /// Architecture name used for the checkpoint file,
    /// `saved_models/<arch_name>_best`.
    pub fn arch_name(self) -> &'static str {
        match self {
            ModelKind::CnnModel => "GestureCnn",
            ModelKind::SimpleCnn => "SimpleCnn",
            ModelKind::Resnet => "ResNet18",
            ModelKind::Squeezenet => "SqueezeNet",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModelKind::CnnModel => "cnn_model",
            ModelKind::SimpleCnn => "simple_cnn",
            ModelKind::Resnet => "resnet",
            ModelKind::Squeezenet => "squeezenet",
        };
        write!(f, "{name}")
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
// The contract every factory must honor: a (B, 1, 28, 28) batch
// maps to a (B, 25) logit tensor.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{IMAGE_SIDE, NUM_CLASSES};

    type TestBackend = burn::backend::ndarray::NdArray<f32>;

    fn assert_output_shape<M: GestureModel<TestBackend>>(model: M) {
        let device = Default::default();
        let images = Tensor::<TestBackend, 4>::zeros([2, 1, IMAGE_SIDE, IMAGE_SIDE], &device);
        let logits = model.forward(images);
        assert_eq!(logits.dims(), [2, NUM_CLASSES]);
    }

    #[test]
    fn test_cnn_model_output_shape() {
        let device = Default::default();
        assert_output_shape(GestureCnnConfig::new().init::<TestBackend>(&device));
    }

    #[test]
    fn test_simple_cnn_output_shape() {
        let device = Default::default();
        assert_output_shape(SimpleCnnConfig::new().init::<TestBackend>(&device));
    }

    #[test]
    fn test_resnet_output_shape() {
        let device = Default::default();
        assert_output_shape(ResNet18Config::new().init::<TestBackend>(&device));
    }

    #[test]
    fn test_squeezenet_output_shape() {
        let device = Default::default();
        assert_output_shape(SqueezeNetConfig::new().init::<TestBackend>(&device));
    }
}
