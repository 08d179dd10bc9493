// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a run-scoped CSV file after each
// epoch, one row covering both phases. External tooling plots
// the learning curves from this file.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: average per-sample loss, training phase
//   - train_acc:  fraction of correct predictions, training
//   - val_loss:   average per-sample loss, validation phase
//   - val_acc:    fraction of correct predictions, validation
//
// Output file: runs/<model_name>/metrics.csv
//
// How to read the metrics:
//   - Loss should decrease each epoch (model is learning)
//   - If val_loss rises while train_loss falls → overfitting
//
// An EpochMetrics value is constructed only after both phases
// of its epoch have finished, so a partially-filled row cannot
// exist: the log is append-only and always consistent.
//
// Reference: Rust Book §9 (Error Handling), §12 (I/O)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// One row of metrics data for a single training epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average per-sample cross-entropy loss on the training set
    pub train_loss: f64,

    /// Fraction of training samples predicted correctly
    pub train_acc: f64,

    /// Average per-sample cross-entropy loss on the validation set
    pub val_loss: f64,

    /// Fraction of validation samples predicted correctly
    pub val_acc: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch: usize,
        train_loss: f64,
        train_acc: f64,
        val_loss: f64,
        val_acc: f64,
    ) -> Self {
        Self {
            epoch,
            train_loss,
            train_acc,
            val_loss,
            val_acc,
        }
    }

    /// True when this epoch strictly beats the best validation
    /// accuracy seen so far.
    pub fn is_improvement(&self, best_val_acc: f64) -> bool {
        self.val_acc > best_val_acc
    }
}

/// Appends epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger under the given run directory.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut file = fs::File::create(&csv_path)?;
            writeln!(file, "epoch,train_loss,train_acc,val_loss,val_acc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            file,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.train_acc, m.val_loss, m.val_acc,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement_is_strict() {
        let m = EpochMetrics::new(2, 2.5, 0.4, 2.3, 0.5);
        assert!(m.is_improvement(0.4));
        assert!(!m.is_improvement(0.5));
        assert!(!m.is_improvement(0.6));
    }

    #[test]
    fn test_rows_append_under_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();

        logger.log(&EpochMetrics::new(1, 3.2, 0.1, 3.1, 0.12)).unwrap();
        logger.log(&EpochMetrics::new(2, 2.8, 0.2, 2.9, 0.19)).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "epoch,train_loss,train_acc,val_loss,val_acc");
        assert!(lines[1].starts_with("1,3.2"));
        assert!(lines[2].starts_with("2,2.8"));
    }

    #[test]
    fn test_reopening_does_not_duplicate_header() {
        let dir = tempfile::tempdir().unwrap();
        {
            let logger = MetricsLogger::new(dir.path()).unwrap();
            logger.log(&EpochMetrics::new(1, 1.0, 0.5, 1.0, 0.5)).unwrap();
        }
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(2, 0.9, 0.6, 0.9, 0.6)).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("epoch")).count(), 1);
        assert_eq!(text.lines().count(), 3);
    }
}
