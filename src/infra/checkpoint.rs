// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Persists the best trained model using Burn's CompactRecorder.
//
// What gets saved per run:
//   1. <ArchName>_best.mpk.gz — the retained best weights
//   2. train_config.json      — the run's hyperparameters
//
// Why save the config beside the weights?
//   Reloading weights requires rebuilding the exact same
//   architecture first; the JSON records what that was, and
//   with which data/optimizer settings the checkpoint was
//   produced.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack + gzip
//   - Type-safe: loading fails if the architecture differs
//
// Directory creation is idempotent: created if absent, reused
// if present, never an error source.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    module::Module,
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager, creating the directory
    /// if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save the retained best model as `<arch_name>_best`.
    /// The recorder appends its own `.mpk.gz` extension.
    /// Returns the path the weights were written under.
    pub fn save_best<B: Backend, M: Module<B>>(
        &self,
        model: &M,
        arch_name: &str,
    ) -> Result<PathBuf> {
        let path = self.dir.join(format!("{arch_name}_best"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved best model to '{}'", path.display());
        Ok(path)
    }

    /// Load `<arch_name>_best` into a freshly built model of the
    /// same architecture.
    pub fn load_best<B: Backend, M: Module<B>>(
        &self,
        model: M,
        arch_name: &str,
        device: &B::Device,
    ) -> Result<M> {
        let path = self.dir.join(format!("{arch_name}_best"));

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you trained this model first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Record the run's hyperparameters as pretty-printed JSON.
    pub fn save_run_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::models::{GestureModel, SimpleCnnConfig};
    use crate::ml::trainer::InnerBackend;

    #[test]
    fn test_best_model_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path());
        let device = Default::default();

        let model = SimpleCnnConfig::new().init::<InnerBackend>(&device);
        let images = Tensor::<InnerBackend, 4>::ones([1, 1, 28, 28], &device);
        let reference = model.forward(images.clone()).into_data();

        manager.save_best(&model, "SimpleCnn").unwrap();

        let fresh = SimpleCnnConfig::new().init::<InnerBackend>(&device);
        let restored = manager
            .load_best(fresh, "SimpleCnn", &device)
            .unwrap();

        assert_eq!(restored.forward(images).into_data(), reference);
    }

    #[test]
    fn test_loading_without_training_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path());
        let device = Default::default();

        let model = SimpleCnnConfig::new().init::<InnerBackend>(&device);
        let err = manager
            .load_best(model, "SimpleCnn", &device)
            .unwrap_err()
            .to_string();
        assert!(err.contains("trained"));
    }

    #[test]
    fn test_run_config_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let manager = CheckpointManager::new(dir.path());
        manager.save_run_config(&TrainConfig::default()).unwrap();

        let json = fs::read_to_string(dir.path().join("train_config.json")).unwrap();
        assert!(json.contains("learning_rate"));
    }
}
