// ============================================================
// Layer 5 — GestureCnn
// ============================================================
// The default architecture: two same-padded convolution/pool
// stages followed by a two-layer classification head. Small
// enough to train on CPU in minutes, strong enough to fit the
// 25-class gesture task.
//
// Spatial bookkeeping (28×28 input):
//   conv1 (3×3, same) → 28×28×32 → pool → 14×14×32
//   conv2 (3×3, same) → 14×14×64 → pool → 7×7×64
//   flatten → 3136 → fc1 → 128 → fc2 → 25

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d,
    },
    prelude::*,
    tensor::activation::relu,
};

use super::GestureModel;

#[derive(Config, Debug)]
pub struct GestureCnnConfig {
    #[config(default = "25")]
    pub num_classes: usize,
    #[config(default = "0.25")]
    pub dropout: f64,
}

impl GestureCnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GestureCnn<B> {
        let conv1 = Conv2dConfig::new([1, 32], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let conv2 = Conv2dConfig::new([32, 64], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let pool1 = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        let pool2 = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        let dropout = DropoutConfig::new(self.dropout).init();
        let fc1 = LinearConfig::new(64 * 7 * 7, 128).init(device);
        let fc2 = LinearConfig::new(128, self.num_classes).init(device);

        GestureCnn {
            conv1,
            conv2,
            pool1,
            pool2,
            dropout,
            fc1,
            fc2,
        }
    }
}

#[derive(Module, Debug)]
pub struct GestureCnn<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    pool1: MaxPool2d,
    pool2: MaxPool2d,
    dropout: Dropout,
    fc1: Linear<B>,
    fc2: Linear<B>,
}

impl<B: Backend> GestureModel<B> for GestureCnn<B> {
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.pool1.forward(relu(self.conv1.forward(images)));
        let x = self.pool2.forward(relu(self.conv2.forward(x)));
        let x = self.dropout.forward(x);

        let [batch_size, channels, height, width] = x.dims();
        let x = x.reshape([batch_size, channels * height * width]);

        let x = relu(self.fc1.forward(x));
        self.fc2.forward(x)
    }
}
