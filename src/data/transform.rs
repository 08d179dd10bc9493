// ============================================================
// Layer 4 — Transform Pipeline
// ============================================================
// Per-phase preprocessing of a raw 28×28 gesture image.
//
// Training applies randomized augmentation before converting
// to the network's numeric representation:
//   1. rotation by a uniform angle in ±10°
//   2. horizontal flip with probability 0.5
//   3. brightness/contrast jitter with factors in [0.5, 1.5]
//   4. random zoom crop resized back to 28×28 (scale 1.0–1.5)
//   5. scale to f32 in [0, 1]
//
// Validation and test apply only step 5. This asymmetry is a
// correctness property: evaluation must be reproducible and
// must never see stochastic augmentation.
//
// Augmentation draws from thread_rng(), so the pipeline stays
// Send + Sync and works unchanged under data-loader workers.
//
// Reference: image crate documentation (imageops)

use image::{
    imageops::{self, FilterType},
    GrayImage, Luma,
};
use rand::Rng;

use crate::domain::phase::Phase;
use crate::domain::sample::{IMAGE_PIXELS, IMAGE_SIDE};

const ROTATION_DEGREES: f32 = 10.0;
const JITTER_RANGE: std::ops::RangeInclusive<f32> = 0.5..=1.5;
const ZOOM_RANGE: std::ops::RangeInclusive<f32> = 1.0..=1.5;

/// Converts raw pixels into normalized floats, with randomized
/// augmentation when built for the training phase.
#[derive(Debug, Clone)]
pub struct TransformPipeline {
    augment: bool,
}

impl TransformPipeline {
    pub fn for_phase(phase: Phase) -> Self {
        Self {
            augment: phase.augments(),
        }
    }

    /// Apply the pipeline to one sample's pixels.
    ///
    /// Input and output both hold [`IMAGE_PIXELS`] values in
    /// row-major order; the output is scaled to [0, 1].
    pub fn apply(&self, pixels: &[u8]) -> Vec<f32> {
        if !self.augment {
            return to_unit_floats(pixels);
        }

        let mut rng = rand::thread_rng();
        let side = IMAGE_SIDE as u32;
        // Pixel count is validated at the parse boundary
        let mut image = GrayImage::from_raw(side, side, pixels.to_vec())
            .expect("gesture samples hold 28x28 pixels");

        let angle = rng.gen_range(-ROTATION_DEGREES..=ROTATION_DEGREES).to_radians();
        image = rotate(&image, angle);

        if rng.gen_bool(0.5) {
            image = imageops::flip_horizontal(&image);
        }

        let brightness = rng.gen_range(JITTER_RANGE);
        let contrast = rng.gen_range(JITTER_RANGE);
        image = jitter(&image, brightness, contrast);

        // Zoom crop: a scale of s crops a region of side/sqrt(s)
        // and resizes it back up to the full 28×28.
        let scale = rng.gen_range(ZOOM_RANGE);
        let crop_side = ((IMAGE_SIDE as f32) / scale.sqrt()).round().max(1.0) as u32;
        let crop_side = crop_side.min(side);
        let max_offset = side - crop_side;
        let x = if max_offset == 0 { 0 } else { rng.gen_range(0..=max_offset) };
        let y = if max_offset == 0 { 0 } else { rng.gen_range(0..=max_offset) };
        let cropped = imageops::crop_imm(&image, x, y, crop_side, crop_side).to_image();
        image = imageops::resize(&cropped, side, side, FilterType::Triangle);

        to_unit_floats(image.as_raw())
    }
}

fn to_unit_floats(pixels: &[u8]) -> Vec<f32> {
    debug_assert_eq!(pixels.len(), IMAGE_PIXELS);
    pixels.iter().map(|&p| p as f32 / 255.0).collect()
}

/// Brightness multiplies every value; contrast scales the
/// distance from the image's mean intensity.
fn jitter(image: &GrayImage, brightness: f32, contrast: f32) -> GrayImage {
    let pixel_count = (image.width() * image.height()) as f32;
    let mean = image.pixels().map(|p| p.0[0] as f32).sum::<f32>() / pixel_count;

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let value = pixel.0[0] as f32;
        let adjusted = ((value - mean) * contrast + mean) * brightness;
        pixel.0[0] = adjusted.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Rotate around the image center, sampling the source through
/// the inverse mapping with bilinear interpolation. Out-of-image
/// samples read as black, matching the dataset background.
fn rotate(image: &GrayImage, angle: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let (sin, cos) = angle.sin_cos();

    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let src_x = cos * dx + sin * dy + cx;
        let src_y = -sin * dx + cos * dy + cy;
        Luma([sample_bilinear(image, src_x, src_y)])
    })
}

fn sample_bilinear(image: &GrayImage, x: f32, y: f32) -> u8 {
    let (width, height) = image.dimensions();
    if x < 0.0 || y < 0.0 || x > (width - 1) as f32 || y > (height - 1) as f32 {
        return 0;
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let at = |px: u32, py: u32| image.get_pixel(px, py).0[0] as f32;
    let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
    let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
    (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_pixels() -> Vec<u8> {
        (0..IMAGE_PIXELS).map(|i| (i % 256) as u8).collect()
    }

    #[test]
    fn test_eval_transform_is_plain_scaling() {
        let pixels = gradient_pixels();
        let out = TransformPipeline::for_phase(Phase::Val).apply(&pixels);
        assert_eq!(out.len(), IMAGE_PIXELS);
        for (raw, scaled) in pixels.iter().zip(out.iter()) {
            assert_eq!(*scaled, *raw as f32 / 255.0);
        }
    }

    #[test]
    fn test_eval_transform_is_deterministic() {
        let pixels = gradient_pixels();
        let pipeline = TransformPipeline::for_phase(Phase::Test);
        assert_eq!(pipeline.apply(&pixels), pipeline.apply(&pixels));
    }

    #[test]
    fn test_train_transform_stays_in_unit_range() {
        let pixels = gradient_pixels();
        let pipeline = TransformPipeline::for_phase(Phase::Train);
        for _ in 0..10 {
            let out = pipeline.apply(&pixels);
            assert_eq!(out.len(), IMAGE_PIXELS);
            assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let image = GrayImage::from_raw(28, 28, gradient_pixels()).unwrap();
        assert_eq!(rotate(&image, 0.0).as_raw(), image.as_raw());
    }

    #[test]
    fn test_neutral_jitter_is_identity() {
        let image = GrayImage::from_raw(28, 28, gradient_pixels()).unwrap();
        assert_eq!(jitter(&image, 1.0, 1.0).as_raw(), image.as_raw());
    }
}
