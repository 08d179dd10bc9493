// ============================================================
// Layer 5 — ResNet-18 (adapted)
// ============================================================
// The standard 18-layer residual network, adapted in exactly
// two places: the stem convolution accepts one channel instead
// of three, and the final linear layer emits 25 classes.
// Everything else keeps the published topology: four stages of
// two basic blocks (64/128/256/512 channels), batch norm after
// every convolution, identity shortcuts with a projection where
// the shape changes, global average pooling before the head.
// Weights are randomly initialized; nothing is pretrained.
//
// Spatial bookkeeping (28×28 input):
//   stem 7×7/2 → 14×14 → maxpool 3×3/2 → 7×7
//   stage1 7×7, stage2 4×4, stage3 2×2, stage4 1×1 → avgpool
//
// Reference: He et al. (2016) Deep Residual Learning

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, Linear, LinearConfig, PaddingConfig2d,
    },
    prelude::*,
    tensor::activation::relu,
};

use super::GestureModel;

#[derive(Config, Debug)]
pub struct ResNet18Config {
    #[config(default = "25")]
    pub num_classes: usize,
}

impl ResNet18Config {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ResNet18<B> {
        let conv1 = Conv2dConfig::new([1, 64], [7, 7])
            .with_stride([2, 2])
            .with_padding(PaddingConfig2d::Explicit(3, 3))
            .with_bias(false)
            .init(device);
        let bn1 = BatchNormConfig::new(64).init(device);
        let maxpool = MaxPool2dConfig::new([3, 3])
            .with_strides([2, 2])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init();

        let stage = |channels_in: usize, channels_out: usize, stride: usize| -> Vec<BasicBlock<B>> {
            vec![
                BasicBlock::new(channels_in, channels_out, stride, device),
                BasicBlock::new(channels_out, channels_out, 1, device),
            ]
        };

        ResNet18 {
            conv1,
            bn1,
            maxpool,
            layer1: stage(64, 64, 1),
            layer2: stage(64, 128, 2),
            layer3: stage(128, 256, 2),
            layer4: stage(256, 512, 2),
            avgpool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            fc: LinearConfig::new(512, self.num_classes).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct ResNet18<B: Backend> {
    conv1: Conv2d<B>,
    bn1: BatchNorm<B, 2>,
    maxpool: MaxPool2d,
    layer1: Vec<BasicBlock<B>>,
    layer2: Vec<BasicBlock<B>>,
    layer3: Vec<BasicBlock<B>>,
    layer4: Vec<BasicBlock<B>>,
    avgpool: AdaptiveAvgPool2d,
    fc: Linear<B>,
}

impl<B: Backend> GestureModel<B> for ResNet18<B> {
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let mut x = relu(self.bn1.forward(self.conv1.forward(images)));
        x = self.maxpool.forward(x);

        for block in self
            .layer1
            .iter()
            .chain(&self.layer2)
            .chain(&self.layer3)
            .chain(&self.layer4)
        {
            x = block.forward(x);
        }

        let x = self.avgpool.forward(x);
        let [batch_size, channels, _, _] = x.dims();
        self.fc.forward(x.reshape([batch_size, channels]))
    }
}

// ─── BasicBlock ───────────────────────────────────────────────────────────────
/// Two 3×3 convolutions with a residual shortcut. The first
/// block of a stage may halve the resolution and widen the
/// channels; its shortcut then needs a 1×1 projection so the
/// addition lines up.
#[derive(Module, Debug)]
pub struct BasicBlock<B: Backend> {
    conv1: Conv2d<B>,
    bn1: BatchNorm<B, 2>,
    conv2: Conv2d<B>,
    bn2: BatchNorm<B, 2>,
    downsample: Option<Projection<B>>,
}

#[derive(Module, Debug)]
pub struct Projection<B: Backend> {
    conv: Conv2d<B>,
    bn: BatchNorm<B, 2>,
}

impl<B: Backend> BasicBlock<B> {
    fn new(channels_in: usize, channels_out: usize, stride: usize, device: &B::Device) -> Self {
        let conv3x3 = |cin, cout, s| {
            Conv2dConfig::new([cin, cout], [3, 3])
                .with_stride([s, s])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .with_bias(false)
                .init(device)
        };

        let downsample = (stride != 1 || channels_in != channels_out).then(|| Projection {
            conv: Conv2dConfig::new([channels_in, channels_out], [1, 1])
                .with_stride([stride, stride])
                .with_bias(false)
                .init(device),
            bn: BatchNormConfig::new(channels_out).init(device),
        });

        Self {
            conv1: conv3x3(channels_in, channels_out, stride),
            bn1: BatchNormConfig::new(channels_out).init(device),
            conv2: conv3x3(channels_out, channels_out, 1),
            bn2: BatchNormConfig::new(channels_out).init(device),
            downsample,
        }
    }

    fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let shortcut = match &self.downsample {
            Some(projection) => projection.bn.forward(projection.conv.forward(input.clone())),
            None => input.clone(),
        };

        let x = relu(self.bn1.forward(self.conv1.forward(input)));
        let x = self.bn2.forward(self.conv2.forward(x));
        relu(x + shortcut)
    }
}
