use std::path::Path;

use deep_core::autograd::no_grad;
use deep_core::nn::{load_state_dict, Module};
use deep_core::Tensor;
use deep_data::{collate_tensors, DataLoader, Dataset, SequentialSampler, TensorDataset};

use crate::dataset::csv_to_tensor;
use crate::error::WineError;
use crate::model::WineRegressor;

/// Metrics of a model on a held-out partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalReport {
    pub samples: usize,
    /// Mean squared error over all samples.
    pub mse: f32,
    /// Share of samples whose rounded prediction equals the label.
    pub accuracy: f32,
}

/// Scores `model` on the partition stored at `test_path`.
pub fn evaluate(model: &WineRegressor, test_path: &Path, batch_size: usize) -> Result<EvalReport, WineError> {
    let (features, labels) = csv_to_tensor(test_path)?;
    evaluate_tensors(model, &features, &labels, batch_size)
}

/// Runs `model` on `[N, 11]` features without recording a backward graph, returning `[N]`
/// predictions.
pub fn predict(model: &WineRegressor, features: &Tensor) -> Result<Tensor, WineError> {
    no_grad(|| Ok(model.forward(features)?.squeeze(1)?))
}

/// Scores `model` on in-memory `[N, 11]` features and `[N]` labels, in row order.
pub fn evaluate_tensors(
    model: &WineRegressor,
    features: &Tensor,
    labels: &Tensor,
    batch_size: usize,
) -> Result<EvalReport, WineError> {
    let dataset = TensorDataset::new(vec![features.detach(), labels.detach()])?;
    if dataset.is_empty() {
        return Err(WineError::EmptyDataset);
    }
    let samples = dataset.len();
    let loader = DataLoader::new(dataset, batch_size, SequentialSampler::new(), false)?;

    let mut squared_error = 0.0f64;
    let mut correct = 0usize;
    for batch in loader.iter() {
        let columns = collate_tensors(batch?)?;
        let predictions = predict(model, &columns[0])?.to_vec();
        for (prediction, label) in predictions.iter().zip(columns[1].to_vec()) {
            let diff = (prediction - label) as f64;
            squared_error += diff * diff;
            if prediction.round() == label {
                correct += 1;
            }
        }
    }

    let report = EvalReport {
        samples,
        mse: (squared_error / samples as f64) as f32,
        accuracy: correct as f32 / samples as f32,
    };
    log::info!(
        "Evaluated {} samples: mse {:.4}, accuracy {:.2}%",
        report.samples,
        report.mse,
        report.accuracy * 100.0
    );
    Ok(report)
}

/// Loads the checkpoint into a fresh model and evaluates it on `test_path`.
///
/// Returns `Ok(None)` after a warning when there is no checkpoint to evaluate.
pub fn test(test_path: &Path, checkpoint: &Path, batch_size: usize) -> Result<Option<EvalReport>, WineError> {
    if !checkpoint.is_file() {
        log::warn!(
            "No checkpoint at {}; run with --train first. Skipping evaluation.",
            checkpoint.display()
        );
        return Ok(None);
    }
    let model = WineRegressor::new()?;
    load_state_dict(&model, checkpoint)?;
    log::info!("Loaded model from {}", checkpoint.display());
    evaluate(&model, test_path, batch_size).map(Some)
}

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod tests;
