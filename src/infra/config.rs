// ============================================================
// Layer 6 — Settings File
// ============================================================
// Reads the YAML settings file into nested, strongly-typed
// option groups:
//
//   train:                         test:
//     train_set:                     test_set:
//       path, val_split, shuffle       path
//     batch_size, workers,           batch_size, workers
//     epochs, learning_rate,
//     momentum, save,
//     learning_rate_gamma,
//     learning_rate_decay_period
//
// Missing or mistyped keys surface as serde_yaml errors and
// abort startup; range validation runs immediately after, so a
// nonsensical configuration never reaches the data layer.
//
// Reference: serde_yaml documentation

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// The full settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub train: TrainSection,
    pub test: TestSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSection {
    pub train_set: TrainSetSection,
    pub batch_size: usize,
    pub workers: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub save: bool,
    pub learning_rate_gamma: f64,
    pub learning_rate_decay_period: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSetSection {
    pub path: PathBuf,
    pub val_split: f64,
    pub shuffle: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSection {
    pub test_set: TestSetSection,
    pub batch_size: usize,
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSetSection {
    pub path: PathBuf,
}

impl AppConfig {
    /// Load and validate a settings file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("cannot parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let train = &self.train;
        ensure!(
            (0.0..1.0).contains(&train.train_set.val_split),
            "train.train_set.val_split must be in [0, 1), got {}",
            train.train_set.val_split,
        );
        ensure!(train.batch_size >= 1, "train.batch_size must be at least 1");
        ensure!(train.workers >= 1, "train.workers must be at least 1");
        ensure!(
            train.learning_rate > 0.0,
            "train.learning_rate must be positive, got {}",
            train.learning_rate,
        );
        ensure!(
            (0.0..=1.0).contains(&train.momentum),
            "train.momentum must be in [0, 1], got {}",
            train.momentum,
        );
        ensure!(
            train.learning_rate_gamma > 0.0 && train.learning_rate_gamma <= 1.0,
            "train.learning_rate_gamma must be in (0, 1], got {}",
            train.learning_rate_gamma,
        );
        ensure!(
            train.learning_rate_decay_period >= 1,
            "train.learning_rate_decay_period must be at least 1",
        );
        ensure!(self.test.batch_size >= 1, "test.batch_size must be at least 1");
        ensure!(self.test.workers >= 1, "test.workers must be at least 1");
        Ok(())
    }
}
