// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Build train/val datasets   (Layer 4 - data)
//   Step 2: Open run log + checkpoints (Layer 6 - infra)
//   Step 3: Construct the chosen model (Layer 5 - ml)
//   Step 4: Run the training loop      (Layer 5 - ml)
//   Step 5: Persist the best model     (Layer 6 - infra)
//
// Each architecture is a distinct type behind the GestureModel
// trait, so step 3 is a match that builds a fresh instance and
// hands it to the same generic training path.
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::dataset::GestureDataset;
use crate::data::splitter::SPLIT_SEED;
use crate::domain::phase::Phase;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::config::AppConfig;
use crate::infra::metrics::MetricsLogger;
use crate::ml::models::{
    GestureCnnConfig, GestureModel, ModelKind, ResNet18Config, SimpleCnnConfig, SqueezeNetConfig,
};
use crate::ml::trainer::{run_training, InnerBackend, TrainBackend};

use burn::{module::AutodiffModule, tensor::backend::Backend};

const SAVE_MODEL_DIR: &str = "saved_models";
const RUNS_DIR: &str = "runs";

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for one training run, flattened from the
// settings file. Serialisable so the checkpoint manager can
// record it beside the saved weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_set_path: PathBuf,
    pub val_split: f64,
    pub shuffle: bool,
    pub batch_size: usize,
    pub workers: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub save: bool,
    pub learning_rate_gamma: f64,
    pub learning_rate_decay_period: usize,
    pub seed: u64,
}

impl TrainConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        let train = &config.train;
        Self {
            train_set_path: train.train_set.path.clone(),
            val_split: train.train_set.val_split,
            shuffle: train.train_set.shuffle,
            batch_size: train.batch_size,
            workers: train.workers,
            epochs: train.epochs,
            learning_rate: train.learning_rate,
            momentum: train.momentum,
            save: train.save,
            learning_rate_gamma: train.learning_rate_gamma,
            learning_rate_decay_period: train.learning_rate_decay_period,
            seed: SPLIT_SEED,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_set_path: PathBuf::from("data/sign_mnist_train.csv"),
            val_split: 0.25,
            shuffle: true,
            batch_size: 64,
            workers: 4,
            epochs: 25,
            learning_rate: 0.01,
            momentum: 0.9,
            save: true,
            learning_rate_gamma: 0.7,
            learning_rate_decay_period: 7,
            seed: SPLIT_SEED,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
/// Owns the run configuration and the chosen architecture name.
pub struct TrainUseCase {
    config: TrainConfig,
    model: ModelKind,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig, model: ModelKind) -> Self {
        Self { config, model }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: phase datasets over the same file and split ──────────────
        tracing::info!(
            "Loading dataset from '{}' (val_split {}, shuffle {})",
            cfg.train_set_path.display(),
            cfg.val_split,
            cfg.shuffle,
        );
        let train_dataset = GestureDataset::from_csv(
            &cfg.train_set_path,
            Phase::Train,
            cfg.val_split,
            cfg.shuffle,
        )?;
        let val_dataset = GestureDataset::from_csv(
            &cfg.train_set_path,
            Phase::Val,
            cfg.val_split,
            cfg.shuffle,
        )?;
        tracing::info!(
            "Split: {} train, {} validation",
            train_dataset.sample_count(),
            val_dataset.sample_count(),
        );

        // ── Step 2: run-scoped metric log and checkpoint store ───────────────
        let logger = MetricsLogger::new(PathBuf::from(RUNS_DIR).join(self.model.to_string()))?;
        let checkpoints = CheckpointManager::new(SAVE_MODEL_DIR);
        checkpoints.save_run_config(cfg)?;

        // ── Step 3+4: build a FRESH model of the chosen kind and train it ────
        // Seeding before construction makes the random weight
        // initialization reproducible as well.
        TrainBackend::seed(cfg.seed);
        println!("Start training {}", self.model.arch_name());
        let device = Default::default();
        match self.model {
            ModelKind::CnnModel => self.train_model(
                GestureCnnConfig::new().init::<TrainBackend>(&device),
                train_dataset,
                val_dataset,
                &logger,
                &checkpoints,
            ),
            ModelKind::SimpleCnn => self.train_model(
                SimpleCnnConfig::new().init::<TrainBackend>(&device),
                train_dataset,
                val_dataset,
                &logger,
                &checkpoints,
            ),
            ModelKind::Resnet => self.train_model(
                ResNet18Config::new().init::<TrainBackend>(&device),
                train_dataset,
                val_dataset,
                &logger,
                &checkpoints,
            ),
            ModelKind::Squeezenet => self.train_model(
                SqueezeNetConfig::new().init::<TrainBackend>(&device),
                train_dataset,
                val_dataset,
                &logger,
                &checkpoints,
            ),
        }
    }

    fn train_model<M>(
        &self,
        model: M,
        train_dataset: GestureDataset,
        val_dataset: GestureDataset,
        logger: &MetricsLogger,
        checkpoints: &CheckpointManager,
    ) -> Result<()>
    where
        M: GestureModel<TrainBackend> + AutodiffModule<TrainBackend>,
        M::InnerModule: GestureModel<InnerBackend>,
    {
        let outcome = run_training(&self.config, model, train_dataset, val_dataset, logger)?;

        tracing::info!(
            "Best validation accuracy: {:.4}; curves logged to '{}'",
            outcome.best_val_accuracy,
            logger.csv_path().display(),
        );

        // ── Step 5: persist the retained best model ──────────────────────────
        if self.config.save {
            let path = checkpoints.save_best(&outcome.model, self.model.arch_name())?;
            println!("Save model in {}", path.display());
        }

        Ok(())
    }
}
