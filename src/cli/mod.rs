// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction, parsed with the
// `clap` crate. The surface is deliberately small:
//
//   --config <path>   settings file (default config.yaml)
//   -m, --model <name> one of the four registered architectures
//
// Argument errors and config validation failures surface as a
// non-zero exit before any data is touched. All business logic
// is delegated to Layer 2 (application).
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::application::train_use_case::{TrainConfig, TrainUseCase};
use crate::infra::config::AppConfig;
use crate::ml::models::ModelKind;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "sign-language-mnist",
    version,
    about = "Train a sign-language gesture classifier on a CSV image dataset."
)]
pub struct Cli {
    /// Config file path
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Model to be trained
    #[arg(short, long, value_enum, default_value_t = ModelKind::CnnModel)]
    pub model: ModelKind,
}

impl Cli {
    /// Load and validate the settings file, then hand off to the
    /// training use case. This layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        let app_config = AppConfig::from_yaml_file(&self.config)?;

        tracing::info!(
            "Training model '{}' with settings from '{}'",
            self.model,
            self.config.display(),
        );

        let use_case = TrainUseCase::new(TrainConfig::from_app_config(&app_config), self.model);
        use_case.execute()?;

        println!("Training complete.");
        Ok(())
    }
}
