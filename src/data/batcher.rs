// ============================================================
// Layer 4 — Gesture Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<GestureItem>
// into device-resident tensors.
//
// How batching works here:
//   Input:  Vec of N items, each with 784 normalized pixels
//   Output: GestureBatch with images [N, 1, 28, 28] and
//           targets [N]
//
//   We flatten all pixels into one long Vec, build a 1D tensor
//   on the batcher's device, then reshape to the NCHW layout
//   the convolution layers expect. Batches are therefore
//   created directly on the compute device; there is no
//   separate host-to-device move in the training loop.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::GestureItem;
use crate::domain::sample::IMAGE_SIDE;

// ─── GestureBatch ─────────────────────────────────────────────────────────────
/// A batch of gesture samples ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct GestureBatch<B: Backend> {
    /// Image tensor, shape [batch_size, 1, 28, 28], values in [0, 1]
    pub images: Tensor<B, 4>,

    /// Class ids, shape [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

// ─── GestureBatcher ───────────────────────────────────────────────────────────
/// Holds the target device so tensors are created where the
/// model computes.
#[derive(Clone, Debug)]
pub struct GestureBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> GestureBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<GestureItem, GestureBatch<B>> for GestureBatcher<B> {
    fn batch(&self, items: Vec<GestureItem>) -> GestureBatch<B> {
        let batch_size = items.len();

        let image_flat: Vec<f32> = items
            .iter()
            .flat_map(|item| item.image.iter().copied())
            .collect();

        let labels: Vec<i32> = items.iter().map(|item| item.label as i32).collect();

        let images = Tensor::<B, 1>::from_floats(image_flat.as_slice(), &self.device)
            .reshape([batch_size, 1, IMAGE_SIDE, IMAGE_SIDE]);

        let targets = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        GestureBatch { images, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::IMAGE_PIXELS;

    type TestBackend = burn::backend::ndarray::NdArray<f32>;

    #[test]
    fn test_batch_shapes_and_targets() {
        let items = vec![
            GestureItem {
                image: vec![0.0; IMAGE_PIXELS],
                label: 3,
            },
            GestureItem {
                image: vec![1.0; IMAGE_PIXELS],
                label: 17,
            },
        ];

        let batcher = GestureBatcher::<TestBackend>::new(Default::default());
        let batch = batcher.batch(items);

        assert_eq!(batch.images.dims(), [2, 1, IMAGE_SIDE, IMAGE_SIDE]);
        assert_eq!(batch.targets.dims(), [2]);

        let targets = batch.targets.into_data();
        assert_eq!(targets.convert::<i32>().value, vec![3, 17]);
    }
}
