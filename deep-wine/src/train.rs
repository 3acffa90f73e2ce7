use std::fs;
use std::path::{Path, PathBuf};

use deep_core::nn::{save_state_dict, MSELoss, Module, Reduction};
use deep_core::optim::{Optimizer, SgdOptimizer};
use deep_core::Tensor;
use deep_data::{collate_tensors, DataLoader, Dataset, RandomSampler, TensorDataset};

use crate::dataset::csv_to_tensor;
use crate::error::WineError;
use crate::model::WineRegressor;

pub const DEFAULT_CHECKPOINT: &str = "./models/python-model.pth";

/// Hyper-parameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub lr: f32,
    pub momentum: f32,
    /// Epochs between two `info` progress lines. 0 disables them.
    pub log_every: usize,
    /// Seed of the batch shuffling. `None` shuffles from the thread-local RNG.
    pub seed: Option<u64>,
    /// Where the trained state dict is written, if anywhere.
    pub checkpoint: Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1000,
            batch_size: 64,
            lr: 5e-5,
            momentum: 0.9,
            log_every: 10,
            seed: None,
            checkpoint: Some(PathBuf::from(DEFAULT_CHECKPOINT)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Mean batch loss of every epoch, in order.
    pub epoch_losses: Vec<f32>,
    pub samples: usize,
    pub batches_per_epoch: usize,
}

impl TrainReport {
    pub fn final_loss(&self) -> Option<f32> {
        self.epoch_losses.last().copied()
    }
}

/// Trains a fresh [`WineRegressor`] on the partition at `train_path`.
///
/// The model is initialised from `config.seed` when one is given. When
/// `config.checkpoint` is set, the trained state dict is written there, creating the
/// parent directory if needed.
pub fn train(train_path: &Path, config: &TrainConfig) -> Result<(WineRegressor, TrainReport), WineError> {
    let (features, labels) = csv_to_tensor(train_path)?;
    log::info!(
        "Loaded {} training rows from {}",
        labels.numel(),
        train_path.display()
    );

    let model = match config.seed {
        Some(seed) => WineRegressor::with_seed(seed)?,
        None => WineRegressor::new()?,
    };
    let report = train_on_tensors(&model, &features, &labels, config)?;

    if let Some(checkpoint) = &config.checkpoint {
        if let Some(parent) = checkpoint.parent() {
            fs::create_dir_all(parent)?;
        }
        save_state_dict(&model, checkpoint)?;
        log::info!("Saved model to {}", checkpoint.display());
    }
    Ok((model, report))
}

/// Runs the training loop over in-memory tensors.
///
/// `features` is `[N, 11]` and `labels` is `[N]`. Each step clears the gradients, runs
/// the model, takes the mean squared error between the squeezed `[B]` predictions and
/// the labels, back-propagates and updates the parameters with SGD.
///
/// # Errors
/// * `EmptyDataset` if there are no rows.
/// * `Deep` for shape problems or invalid hyper-parameters.
pub fn train_on_tensors(
    model: &WineRegressor,
    features: &Tensor,
    labels: &Tensor,
    config: &TrainConfig,
) -> Result<TrainReport, WineError> {
    let dataset = TensorDataset::new(vec![features.clone(), labels.clone()])?;
    if dataset.is_empty() {
        return Err(WineError::EmptyDataset);
    }
    let samples = dataset.len();

    let sampler = match config.seed {
        Some(seed) => RandomSampler::with_seed(seed),
        None => RandomSampler::new(false, None),
    };
    let loader = DataLoader::new(dataset, config.batch_size, sampler, false)?;
    let batches_per_epoch = loader.num_batches();

    let mut optimizer = SgdOptimizer::new(
        model.parameters().into_iter().cloned(),
        config.lr,
        config.momentum,
        0.0,
    )?;
    let criterion = MSELoss::new(Reduction::Mean);

    let mut epoch_losses = Vec::with_capacity(config.epochs);
    for epoch in 1..=config.epochs {
        if config.log_every > 0 && epoch % config.log_every == 0 {
            log::info!("Training epoch {}...", epoch);
        }

        let mut total = 0.0f32;
        let mut batches = 0usize;
        for batch in loader.iter() {
            let columns = collate_tensors(batch?)?;
            let (inputs, targets) = (&columns[0], &columns[1]);

            optimizer.zero_grad();
            let outputs = model.forward(inputs)?.squeeze(1)?;
            let loss = criterion.calculate(&outputs, targets)?;
            loss.backward(None)?;
            optimizer.step()?;

            let value = loss.item()?;
            log::trace!("epoch {} batch {}: loss {}", epoch, batches, value);
            total += value;
            batches += 1;
        }

        let epoch_loss = total / batches.max(1) as f32;
        if config.log_every > 0 && epoch % config.log_every == 0 {
            log::info!("epoch {} loss {:.6}", epoch, epoch_loss);
        } else {
            log::debug!("epoch {} loss {:.6}", epoch, epoch_loss);
        }
        epoch_losses.push(epoch_loss);
    }

    Ok(TrainReport {
        epoch_losses,
        samples,
        batches_per_epoch,
    })
}

#[cfg(test)]
#[path = "train_test.rs"]
mod tests;
