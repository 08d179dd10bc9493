// ============================================================
// Layer 4 — Gesture Dataset
// ============================================================
// GestureDataset ties the pipeline together for one phase:
// it selects its subset of the raw samples once, at
// construction (train/val via the seeded splitter, test takes
// the full file), and applies the phase transform plus an
// optional label transform every time the loader asks for an
// item.
//
// Phase validity is a type: callers hold a Phase enum value, so
// an unknown phase name has already failed at the string
// boundary before this module does any I/O.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use burn::data::dataset::Dataset;

use crate::data::loader::CsvGestureSource;
use crate::data::splitter::{self, SPLIT_SEED};
use crate::data::transform::TransformPipeline;
use crate::domain::phase::Phase;
use crate::domain::sample::GestureSample;
use crate::domain::traits::SampleSource;

/// Optional hook applied to every label as it is served,
/// mirroring the image transform on the label side.
pub type LabelTransform = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// One preprocessed dataset item, ready for batching.
#[derive(Debug, Clone)]
pub struct GestureItem {
    /// Normalized pixels in [0, 1], length IMAGE_PIXELS
    pub image: Vec<f32>,

    /// Class id, after the label transform if one is set
    pub label: usize,
}

pub struct GestureDataset {
    samples: Vec<GestureSample>,
    transform: TransformPipeline,
    label_transform: Option<LabelTransform>,
}

impl GestureDataset {
    /// Build the phase subset of a CSV dataset file.
    ///
    /// Train and val phases consume the two segments of the
    /// seeded split; the test phase bypasses splitting and uses
    /// the full file.
    pub fn from_csv(
        path: impl AsRef<Path>,
        phase: Phase,
        val_split: f64,
        shuffle: bool,
    ) -> Result<Self> {
        let source = CsvGestureSource::new(path.as_ref());
        Self::from_source(&source, phase, val_split, shuffle, SPLIT_SEED)
    }

    /// Same as [`Self::from_csv`] but over any sample source.
    pub fn from_source(
        source: &impl SampleSource,
        phase: Phase,
        val_split: f64,
        shuffle: bool,
        seed: u64,
    ) -> Result<Self> {
        let all = source.load_all()?;

        let samples = match phase {
            Phase::Test => all,
            Phase::Train | Phase::Val => {
                let (train_idx, val_idx) =
                    splitter::train_val_indices(all.len(), val_split, shuffle, seed);
                let keep = if phase == Phase::Train { train_idx } else { val_idx };
                keep.into_iter().map(|i| all[i].clone()).collect()
            }
        };

        tracing::debug!("{phase} dataset holds {} samples", samples.len());
        Ok(Self::from_samples(samples, phase))
    }

    /// Wrap an already-selected sample collection for a phase.
    pub fn from_samples(samples: Vec<GestureSample>, phase: Phase) -> Self {
        Self {
            samples,
            transform: TransformPipeline::for_phase(phase),
            label_transform: None,
        }
    }

    /// Install a label transform applied on every `get`.
    pub fn with_label_transform(mut self, transform: LabelTransform) -> Self {
        self.label_transform = Some(transform);
        self
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<GestureItem> for GestureDataset {
    fn get(&self, index: usize) -> Option<GestureItem> {
        let sample = self.samples.get(index)?;
        let image = self.transform.apply(&sample.pixels);
        let label = match &self.label_transform {
            Some(transform) => transform(sample.label),
            None => sample.label,
        };
        Some(GestureItem { image, label })
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{IMAGE_PIXELS, NUM_CLASSES};

    /// In-memory source: sample i carries marker pixel i and
    /// label i % 25, so subsets can be traced back to row ids.
    struct VecSource(usize);

    impl SampleSource for VecSource {
        fn load_all(&self) -> Result<Vec<GestureSample>> {
            Ok((0..self.0)
                .map(|i| GestureSample::new(vec![i as u8; IMAGE_PIXELS], i % NUM_CLASSES))
                .collect())
        }
    }

    fn markers(dataset: &GestureDataset) -> Vec<u8> {
        dataset.samples.iter().map(|s| s.pixels[0]).collect()
    }

    #[test]
    fn test_quarter_split_sizes() {
        let source = VecSource(100);
        let train =
            GestureDataset::from_source(&source, Phase::Train, 0.25, true, SPLIT_SEED).unwrap();
        let val =
            GestureDataset::from_source(&source, Phase::Val, 0.25, true, SPLIT_SEED).unwrap();
        assert_eq!(train.len(), 75);
        assert_eq!(val.len(), 25);
    }

    #[test]
    fn test_train_and_val_partition_the_source() {
        let source = VecSource(100);
        let train =
            GestureDataset::from_source(&source, Phase::Train, 0.25, true, SPLIT_SEED).unwrap();
        let val =
            GestureDataset::from_source(&source, Phase::Val, 0.25, true, SPLIT_SEED).unwrap();

        let mut all = markers(&train);
        all.extend(markers(&val));
        all.sort_unstable();
        assert_eq!(all, (0..100).map(|i| i as u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_reproducible_across_constructions() {
        let source = VecSource(64);
        let first =
            GestureDataset::from_source(&source, Phase::Train, 0.25, true, SPLIT_SEED).unwrap();
        let second =
            GestureDataset::from_source(&source, Phase::Train, 0.25, true, SPLIT_SEED).unwrap();
        assert_eq!(markers(&first), markers(&second));
    }

    #[test]
    fn test_test_phase_uses_full_file() {
        let source = VecSource(40);
        let test =
            GestureDataset::from_source(&source, Phase::Test, 0.25, true, SPLIT_SEED).unwrap();
        assert_eq!(test.len(), 40);
    }

    #[test]
    fn test_get_serves_normalized_pixels() {
        let source = VecSource(4);
        let dataset =
            GestureDataset::from_source(&source, Phase::Test, 0.0, false, SPLIT_SEED).unwrap();
        let item = dataset.get(2).unwrap();
        assert_eq!(item.image.len(), IMAGE_PIXELS);
        assert_eq!(item.image[0], 2.0 / 255.0);
        assert!(dataset.get(4).is_none());
    }

    #[test]
    fn test_identity_label_transform_preserves_labels() {
        let dataset = GestureDataset::from_samples(
            vec![GestureSample::new(vec![0; IMAGE_PIXELS], 3)],
            Phase::Val,
        )
        .with_label_transform(Arc::new(|label| label));
        assert_eq!(dataset.get(0).unwrap().label, 3);
    }

    #[test]
    fn test_label_transform_is_applied() {
        let dataset = GestureDataset::from_samples(
            vec![GestureSample::new(vec![0; IMAGE_PIXELS], 3)],
            Phase::Val,
        )
        .with_label_transform(Arc::new(|label| label + 1));
        assert_eq!(dataset.get(0).unwrap().label, 4);
    }
}
