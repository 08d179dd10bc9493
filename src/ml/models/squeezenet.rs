// ============================================================
// Layer 5 — SqueezeNet (adapted)
// ============================================================
// SqueezeNet's fire modules (a 1×1 squeeze feeding parallel
// 1×1 and 3×3 expands whose outputs concatenate) with the two
// standard adaptations: a single-channel stem and a classifier
// emitting 25 maps. The stem additionally runs at stride 1 and
// kernel 3: the published 224×224 stem would collapse a 28×28
// input to nothing before the first fire module.
// Weights are randomly initialized; nothing is pretrained.
//
// Spatial bookkeeping (28×28 input):
//   conv1 (3×3, same) → 28×28×64 → maxpool 3×3/2 → 13×13
//   fire2/fire3 → maxpool → 6×6 → fire4/fire5 → maxpool → 2×2
//   fire6..fire9 → 2×2×512 → classifier 1×1 conv → avgpool
//
// Reference: Iandola et al. (2016) SqueezeNet

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        Dropout, DropoutConfig, PaddingConfig2d,
    },
    prelude::*,
    tensor::activation::relu,
};

use super::GestureModel;

#[derive(Config, Debug)]
pub struct SqueezeNetConfig {
    #[config(default = "25")]
    pub num_classes: usize,
    #[config(default = "0.5")]
    pub dropout: f64,
}

impl SqueezeNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SqueezeNet<B> {
        let conv1 = Conv2dConfig::new([1, 64], [3, 3])
            .with_padding(PaddingConfig2d::Same)
            .init(device);
        let pool = || {
            MaxPool2dConfig::new([3, 3]).with_strides([2, 2]).init()
        };

        SqueezeNet {
            conv1,
            pool1: pool(),
            fire2: Fire::new(64, 16, 64, device),
            fire3: Fire::new(128, 16, 64, device),
            pool2: pool(),
            fire4: Fire::new(128, 32, 128, device),
            fire5: Fire::new(256, 32, 128, device),
            pool3: pool(),
            fire6: Fire::new(256, 48, 192, device),
            fire7: Fire::new(384, 48, 192, device),
            fire8: Fire::new(384, 64, 256, device),
            fire9: Fire::new(512, 64, 256, device),
            dropout: DropoutConfig::new(self.dropout).init(),
            classifier: Conv2dConfig::new([512, self.num_classes], [1, 1]).init(device),
            avgpool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
        }
    }
}

#[derive(Module, Debug)]
pub struct SqueezeNet<B: Backend> {
    conv1: Conv2d<B>,
    pool1: MaxPool2d,
    fire2: Fire<B>,
    fire3: Fire<B>,
    pool2: MaxPool2d,
    fire4: Fire<B>,
    fire5: Fire<B>,
    pool3: MaxPool2d,
    fire6: Fire<B>,
    fire7: Fire<B>,
    fire8: Fire<B>,
    fire9: Fire<B>,
    dropout: Dropout,
    classifier: Conv2d<B>,
    avgpool: AdaptiveAvgPool2d,
}

impl<B: Backend> GestureModel<B> for SqueezeNet<B> {
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.pool1.forward(relu(self.conv1.forward(images)));
        let x = self.fire3.forward(self.fire2.forward(x));
        let x = self.pool2.forward(x);
        let x = self.fire5.forward(self.fire4.forward(x));
        let x = self.pool3.forward(x);
        let x = self.fire7.forward(self.fire6.forward(x));
        let x = self.fire9.forward(self.fire8.forward(x));

        let x = relu(self.classifier.forward(self.dropout.forward(x)));
        let x = self.avgpool.forward(x);
        let [batch_size, classes, _, _] = x.dims();
        x.reshape([batch_size, classes])
    }
}

// ─── Fire ─────────────────────────────────────────────────────────────────────
/// Squeeze to few channels with 1×1 convolutions, then expand
/// through parallel 1×1 and 3×3 paths concatenated on the
/// channel axis.
#[derive(Module, Debug)]
pub struct Fire<B: Backend> {
    squeeze: Conv2d<B>,
    expand1x1: Conv2d<B>,
    expand3x3: Conv2d<B>,
}

impl<B: Backend> Fire<B> {
    fn new(channels_in: usize, squeeze: usize, expand: usize, device: &B::Device) -> Self {
        Self {
            squeeze: Conv2dConfig::new([channels_in, squeeze], [1, 1]).init(device),
            expand1x1: Conv2dConfig::new([squeeze, expand], [1, 1]).init(device),
            expand3x3: Conv2dConfig::new([squeeze, expand], [3, 3])
                .with_padding(PaddingConfig2d::Same)
                .init(device),
        }
    }

    fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let squeezed = relu(self.squeeze.forward(input));
        let left = relu(self.expand1x1.forward(squeezed.clone()));
        let right = relu(self.expand3x3.forward(squeezed));
        Tensor::cat(vec![left, right], 1)
    }
}
