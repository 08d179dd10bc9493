// ============================================================
// Layer 5 — Training Loop
// ============================================================
// The epoch/phase state machine. Within an epoch the phases
// run strictly in order: train, then validation. Per batch:
//
//   1. The batcher created the tensors on the compute device.
//   2. Forward pass and cross-entropy loss.
//   3. Train phase only: backward pass + one SGD step.
//      Validation runs on model.valid() over the inner
//      backend: no gradient tracking, no weight mutation.
//   4. Running loss (weighted by batch size) and correct
//      prediction counts accumulate in PhaseStats.
//
// After the training phase the LR schedule advances one step.
// After the validation phase, a strictly better validation
// accuracy replaces the retained best-model snapshot. Burn
// tensors are immutable values and the optimizer step returns
// a new model, so model.clone() is a genuine parameter
// snapshot, not a shared handle into mutable state.
//
// The trainer never retries a failed batch and cannot resume a
// partial run; any error aborts via Result.
//
// Reference: Burn Book §5 (Training)

use std::sync::Arc;

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    nn::loss::{CrossEntropyLoss, CrossEntropyLossConfig},
    optim::{momentum::MomentumConfig, GradientsParams, Optimizer, SgdConfig},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::batcher::{GestureBatch, GestureBatcher};
use crate::data::dataset::GestureDataset;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::models::GestureModel;

pub type InnerBackend = burn::backend::ndarray::NdArray<f32>;
pub type TrainBackend = burn::backend::Autodiff<InnerBackend>;

/// What a finished run hands back to the application layer.
pub struct TrainingOutcome<M> {
    /// The best-validation-accuracy model, not the final-epoch one
    pub model: M,

    /// Validation accuracy of the retained model
    pub best_val_accuracy: f64,

    /// One entry per completed epoch
    pub history: Vec<EpochMetrics>,
}

/// Wrap a dataset in batched, optionally-shuffled, multi-worker
/// iteration. Shuffling reorders every epoch from the given
/// seed; evaluation loaders pass None and keep a fixed order.
pub fn build_loader<B: Backend>(
    dataset: GestureDataset,
    device: B::Device,
    batch_size: usize,
    shuffle_seed: Option<u64>,
    workers: usize,
) -> Arc<dyn DataLoader<GestureBatch<B>>> {
    let batcher = GestureBatcher::<B>::new(device);
    let builder = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .num_workers(workers.max(1));

    let builder = match shuffle_seed {
        Some(seed) => builder.shuffle(seed),
        None => builder,
    };

    builder.build(dataset)
}

pub fn run_training<M>(
    cfg: &TrainConfig,
    model: M,
    train_dataset: GestureDataset,
    val_dataset: GestureDataset,
    logger: &MetricsLogger,
) -> Result<TrainingOutcome<M>>
where
    M: GestureModel<TrainBackend> + AutodiffModule<TrainBackend>,
    M::InnerModule: GestureModel<InnerBackend>,
{
    let device = <TrainBackend as Backend>::Device::default();

    let train_loader = build_loader::<TrainBackend>(
        train_dataset,
        device.clone(),
        cfg.batch_size,
        Some(cfg.seed),
        cfg.workers,
    );

    // Validation loader on the inner backend: no autodiff overhead
    let val_loader = build_loader::<InnerBackend>(
        val_dataset,
        device.clone(),
        cfg.batch_size,
        None,
        cfg.workers,
    );

    let loss_fn = CrossEntropyLossConfig::new().init(&device);
    let val_loss_fn = CrossEntropyLossConfig::new().init(&device);

    // SGD with momentum:
    //   v = momentum * v + g
    //   θ = θ - lr * v
    let mut optim = SgdConfig::new()
        .with_momentum(Some(
            MomentumConfig::new().with_momentum(cfg.momentum),
        ))
        .init();

    let mut schedule = StepDecay::new(
        cfg.learning_rate,
        cfg.learning_rate_gamma,
        cfg.learning_rate_decay_period,
    );

    let mut model = model;
    // The initial state is the baseline snapshot, so a zero-epoch
    // run returns the untouched model.
    let mut best_model = model.clone();
    let mut best_accuracy = 0.0f64;
    let mut history = Vec::new();

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train_stats = PhaseStats::default();

        for batch in train_loader.iter() {
            let batch_len = batch.targets.dims()[0];
            let logits = model.forward(batch.images);
            let loss = loss_fn.forward(logits.clone(), batch.targets.clone());

            train_stats.record(
                loss.clone().into_scalar().elem::<f64>(),
                correct_predictions(logits, batch.targets),
                batch_len,
            );

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(schedule.lr(), model, grads);
        }
        schedule.step();

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() hands out the inner-backend view; weights
        // cannot change here.
        let model_valid = model.valid();
        let val_stats = evaluate(&model_valid, &val_loss_fn, &val_loader);

        // Both phases are complete; only now does the combined
        // epoch record exist.
        let metrics = EpochMetrics::new(
            epoch,
            train_stats.avg_loss(),
            train_stats.accuracy(),
            val_stats.avg_loss(),
            val_stats.accuracy(),
        );
        logger.log(&metrics)?;
        println!(
            "Epoch {:>3}/{} | train loss {:.4} acc {:.4} | val loss {:.4} acc {:.4}",
            epoch,
            cfg.epochs,
            metrics.train_loss,
            metrics.train_acc,
            metrics.val_loss,
            metrics.val_acc,
        );

        if metrics.is_improvement(best_accuracy) {
            best_accuracy = metrics.val_acc;
            best_model = model.clone();
            println!("New best model!");
        }

        history.push(metrics);
    }

    tracing::info!(
        "Training finished: {} epochs, best validation accuracy {:.4}",
        cfg.epochs,
        best_accuracy,
    );

    Ok(TrainingOutcome {
        model: best_model,
        best_val_accuracy: best_accuracy,
        history,
    })
}

/// Run one evaluation pass. Takes the model by shared reference:
/// this phase observes, it never updates.
pub fn evaluate<B: Backend, M: GestureModel<B>>(
    model: &M,
    loss_fn: &CrossEntropyLoss<B>,
    loader: &Arc<dyn DataLoader<GestureBatch<B>>>,
) -> PhaseStats {
    let mut stats = PhaseStats::default();

    for batch in loader.iter() {
        let batch_len = batch.targets.dims()[0];
        let logits = model.forward(batch.images);
        let loss = loss_fn.forward(logits.clone(), batch.targets.clone());

        stats.record(
            loss.into_scalar().elem::<f64>(),
            correct_predictions(logits, batch.targets),
            batch_len,
        );
    }

    stats
}

fn correct_predictions<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> usize {
    // argmax(1) returns [batch, 1]; flatten before comparing
    // with the [batch] target vector
    let predictions = logits.argmax(1).flatten::<1>(0, 1);
    predictions
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}

// ─── PhaseStats ───────────────────────────────────────────────────────────────
/// Running loss and accuracy accounting for one phase of one
/// epoch. Loss accumulates weighted by batch size, so the
/// average is per sample, not per batch.
#[derive(Default)]
pub struct PhaseStats {
    loss_sum: f64,
    correct: usize,
    seen: usize,
}

impl PhaseStats {
    fn record(&mut self, batch_loss: f64, correct: usize, batch_len: usize) {
        self.loss_sum += batch_loss * batch_len as f64;
        self.correct += correct;
        self.seen += batch_len;
    }

    pub fn avg_loss(&self) -> f64 {
        if self.seen == 0 {
            f64::NAN
        } else {
            self.loss_sum / self.seen as f64
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.seen == 0 {
            0.0
        } else {
            self.correct as f64 / self.seen as f64
        }
    }
}

// ─── StepDecay ────────────────────────────────────────────────────────────────
/// Step-decay learning-rate schedule: multiply the rate by
/// `gamma` after every `period` completed training phases.
struct StepDecay {
    lr: f64,
    gamma: f64,
    period: usize,
    completed: usize,
}

impl StepDecay {
    fn new(lr: f64, gamma: f64, period: usize) -> Self {
        Self {
            lr,
            gamma,
            period,
            completed: 0,
        }
    }

    fn lr(&self) -> f64 {
        self.lr
    }

    fn step(&mut self) {
        self.completed += 1;
        if self.period > 0 && self.completed % self.period == 0 {
            self.lr *= self.gamma;
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::phase::Phase;
    use crate::domain::sample::{GestureSample, IMAGE_PIXELS, NUM_CLASSES};
    use crate::ml::models::SimpleCnnConfig;

    fn synthetic_dataset(len: usize, phase: Phase) -> GestureDataset {
        let samples = (0..len)
            .map(|i| GestureSample::new(vec![(i * 31 % 256) as u8; IMAGE_PIXELS], i % NUM_CLASSES))
            .collect();
        GestureDataset::from_samples(samples, phase)
    }

    fn small_config(epochs: usize) -> TrainConfig {
        TrainConfig {
            epochs,
            batch_size: 4,
            workers: 1,
            learning_rate: 0.05,
            ..TrainConfig::default()
        }
    }

    fn probe_logits<B: Backend, M: GestureModel<B>>(model: &M, device: &B::Device) -> Vec<f32> {
        let images = Tensor::<B, 4>::ones([1, 1, 28, 28], device);
        model
            .forward(images)
            .into_data()
            .convert::<f32>()
            .value
    }

    #[test]
    fn test_zero_epochs_returns_initial_model_and_no_metrics() {
        let device = Default::default();
        let model = SimpleCnnConfig::new().init::<TrainBackend>(&device);
        let reference = probe_logits(&model, &device);

        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();

        let outcome = run_training(
            &small_config(0),
            model,
            synthetic_dataset(8, Phase::Train),
            synthetic_dataset(4, Phase::Val),
            &logger,
        )
        .unwrap();

        assert!(outcome.history.is_empty());
        assert_eq!(probe_logits(&outcome.model, &device), reference);
    }

    #[test]
    fn test_evaluate_never_mutates_the_model() {
        let device = Default::default();
        let model = SimpleCnnConfig::new().init::<InnerBackend>(&device);
        let before = probe_logits(&model, &device);

        let loader = build_loader::<InnerBackend>(
            synthetic_dataset(8, Phase::Val),
            device.clone(),
            4,
            None,
            1,
        );
        let loss_fn = CrossEntropyLossConfig::new().init(&device);

        let stats = evaluate(&model, &loss_fn, &loader);
        assert!(stats.avg_loss().is_finite());

        // bit-identical outputs: the phase observed, nothing more
        assert_eq!(probe_logits(&model, &device), before);
    }

    #[test]
    fn test_training_runs_and_retains_best_epoch() {
        let device = Default::default();
        let model = SimpleCnnConfig::new().init::<TrainBackend>(&device);

        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();

        let outcome = run_training(
            &small_config(2),
            model,
            synthetic_dataset(8, Phase::Train),
            synthetic_dataset(4, Phase::Val),
            &logger,
        )
        .unwrap();

        assert_eq!(outcome.history.len(), 2);
        for metrics in &outcome.history {
            assert!(metrics.train_loss.is_finite());
            assert!(metrics.val_loss.is_finite());
            // the retained snapshot is the argmax over epochs
            assert!(outcome.best_val_accuracy >= metrics.val_acc);
        }
    }

    #[test]
    fn test_step_decay_halves_on_schedule() {
        let mut schedule = StepDecay::new(1.0, 0.5, 2);
        assert_eq!(schedule.lr(), 1.0);
        schedule.step();
        assert_eq!(schedule.lr(), 1.0);
        schedule.step();
        assert_eq!(schedule.lr(), 0.5);
        schedule.step();
        assert_eq!(schedule.lr(), 0.5);
        schedule.step();
        assert_eq!(schedule.lr(), 0.25);
    }

    #[test]
    fn test_step_decay_with_unit_gamma_is_constant() {
        let mut schedule = StepDecay::new(0.01, 1.0, 1);
        for _ in 0..5 {
            schedule.step();
        }
        assert_eq!(schedule.lr(), 0.01);
    }
}
