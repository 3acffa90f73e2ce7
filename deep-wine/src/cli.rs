//! Command-line surface of the `wine-regression` binary.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::dataset::{transform_dataset, DatasetLayout, Variant, DEFAULT_DATA_DIR};
use crate::error::WineError;
use crate::evaluate::{evaluate, test};
use crate::train::{train, TrainConfig, DEFAULT_CHECKPOINT};

#[derive(Parser, Debug, Clone)]
#[command(name = "wine-regression")]
#[command(about = "Train or evaluate a quality regressor on the wine-quality dataset")]
#[command(version)]
pub struct Cli {
    /// Which table to use
    #[arg(long, value_enum, default_value_t = Variant::White)]
    pub variant: Variant,

    /// Train a new model instead of evaluating the saved one
    #[arg(long, overrides_with = "no_train")]
    pub train: bool,

    #[arg(long, overrides_with = "train", hide = true)]
    pub no_train: bool,

    /// Redo the normalisation and split even if the outputs exist
    #[arg(long, overrides_with = "no_force")]
    pub force: bool,

    #[arg(long, overrides_with = "force", hide = true)]
    pub no_force: bool,

    /// Directory holding the raw and transformed CSV files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Where the trained model is saved and loaded from
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CHECKPOINT)]
    pub checkpoint: PathBuf,

    #[arg(long, default_value_t = 1000)]
    pub epochs: usize,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Learning rate
    #[arg(long, default_value_t = 5e-5)]
    pub lr: f32,

    #[arg(long, default_value_t = 0.9)]
    pub momentum: f32,

    /// Seed for weight initialisation and batch shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Epochs between two progress lines
    #[arg(long, default_value_t = 10)]
    pub log_every: usize,
}

impl Cli {
    pub fn should_train(&self) -> bool {
        self.train && !self.no_train
    }

    pub fn force_transform(&self) -> bool {
        self.force && !self.no_force
    }

    pub fn layout(&self) -> DatasetLayout {
        DatasetLayout::new(&self.data_dir)
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            epochs: self.epochs,
            batch_size: self.batch_size,
            lr: self.lr,
            momentum: self.momentum,
            log_every: self.log_every,
            seed: self.seed,
            checkpoint: Some(self.checkpoint.clone()),
        }
    }
}

/// Prepares the dataset, then trains or evaluates depending on `--train`.
pub fn run(cli: &Cli) -> Result<(), WineError> {
    if let Some(parent) = cli.checkpoint.parent() {
        fs::create_dir_all(parent)?;
    }

    let paths = transform_dataset(&cli.layout(), cli.variant, cli.force_transform())?;

    if cli.should_train() {
        let (model, report) = train(&paths.train, &cli.train_config())?;
        if let Some(loss) = report.final_loss() {
            log::info!(
                "Finished {} epochs over {} samples, final loss {:.6}",
                report.epoch_losses.len(),
                report.samples,
                loss
            );
        }
        evaluate(&model, &paths.test, cli.batch_size)?;
    } else {
        test(&paths.test, &cli.checkpoint, cli.batch_size)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
