// ============================================================
// Layer 5 — SimpleCnn
// ============================================================
// The smallest of the four architectures, LeNet-style with
// valid padding. Useful as a fast baseline and for tests.
//
// Spatial bookkeeping (28×28 input):
//   conv1 (5×5, valid) → 24×24×16 → pool → 12×12×16
//   conv2 (5×5, valid) →  8×8×32  → pool →  4×4×32
//   flatten → 512 → fc → 25

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
};

use super::GestureModel;

#[derive(Config, Debug)]
pub struct SimpleCnnConfig {
    #[config(default = "25")]
    pub num_classes: usize,
}

impl SimpleCnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SimpleCnn<B> {
        SimpleCnn {
            conv1: Conv2dConfig::new([1, 16], [5, 5]).init(device),
            conv2: Conv2dConfig::new([16, 32], [5, 5]).init(device),
            pool1: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            pool2: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            fc: LinearConfig::new(32 * 4 * 4, self.num_classes).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct SimpleCnn<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    pool1: MaxPool2d,
    pool2: MaxPool2d,
    fc: Linear<B>,
}

impl<B: Backend> GestureModel<B> for SimpleCnn<B> {
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.pool1.forward(relu(self.conv1.forward(images)));
        let x = self.pool2.forward(relu(self.conv2.forward(x)));

        let [batch_size, channels, height, width] = x.dims();
        let x = x.reshape([batch_size, channels * height * width]);
        self.fc.forward(x)
    }
}
