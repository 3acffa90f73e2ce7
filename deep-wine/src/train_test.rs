use super::*;
use crate::dataset::FEATURE_COUNT;
use deep_core::nn::load_state_dict;
use deep_core::tensor::{full, randn, zeros};
use std::fs;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn quiet_config(epochs: usize, batch_size: usize) -> TrainConfig {
    TrainConfig {
        epochs,
        batch_size,
        seed: Some(7),
        checkpoint: None,
        ..TrainConfig::default()
    }
}

fn write_partition(path: &Path, rows: usize) {
    let mut text = String::from(",a,b,c,d,e,f,g,h,i,j,k,quality\n");
    for r in 0..rows {
        let values: Vec<String> = (0..FEATURE_COUNT)
            .map(|c| format!("{}", (r + c) as f32 * 0.05 - 0.3))
            .collect();
        text.push_str(&format!("{},{},{}\n", r, values.join(","), 5 + r % 3));
    }
    fs::write(path, text).unwrap();
}

#[test]
fn test_default_config() {
    let config = TrainConfig::default();
    assert_eq!(config.epochs, 1000);
    assert_eq!(config.batch_size, 64);
    assert_eq!(config.lr, 5e-5);
    assert_eq!(config.momentum, 0.9);
    assert_eq!(config.log_every, 10);
    assert_eq!(config.seed, None);
    assert_eq!(config.checkpoint, Some(PathBuf::from(DEFAULT_CHECKPOINT)));
}

#[test]
fn test_one_epoch_on_two_rows_gives_finite_loss() {
    init_logger();
    let model = WineRegressor::with_seed(0).unwrap();
    let features = randn(&[2, FEATURE_COUNT]).unwrap();
    let labels = Tensor::new(vec![5.0, 6.0], vec![2]).unwrap();
    let config = TrainConfig {
        epochs: 1,
        checkpoint: None,
        ..TrainConfig::default()
    };

    let report = train_on_tensors(&model, &features, &labels, &config).unwrap();
    assert_eq!(report.epoch_losses.len(), 1);
    assert_eq!(report.samples, 2);
    assert_eq!(report.batches_per_epoch, 1);
    let loss = report.final_loss().unwrap();
    assert!(loss.is_finite());
    assert!(loss >= 0.0);
}

#[test]
fn test_training_reduces_loss_on_constant_target() {
    init_logger();
    let model = WineRegressor::with_seed(11).unwrap();
    let features = zeros(&[4, FEATURE_COUNT]).unwrap();
    let labels = full(&[4], 6.0).unwrap();
    let config = TrainConfig {
        lr: 0.01,
        ..quiet_config(100, 4)
    };

    let report = train_on_tensors(&model, &features, &labels, &config).unwrap();
    let first = report.epoch_losses[0];
    let last = report.final_loss().unwrap();
    assert!(last < first * 0.5, "loss went from {} to {}", first, last);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let features = randn(&[5, FEATURE_COUNT]).unwrap();
    let labels = Tensor::new(vec![5.0, 6.0, 7.0, 5.0, 6.0], vec![5]).unwrap();
    let config = quiet_config(3, 2);

    let a = WineRegressor::with_seed(2).unwrap();
    let b = WineRegressor::with_seed(2).unwrap();
    let report_a = train_on_tensors(&a, &features, &labels, &config).unwrap();
    let report_b = train_on_tensors(&b, &features, &labels, &config).unwrap();
    assert_eq!(report_a, report_b);
    assert_eq!(report_a.batches_per_epoch, 3);
    for (pa, pb) in a.parameters().iter().zip(b.parameters()) {
        assert_eq!(pa.to_vec(), pb.to_vec());
    }
}

#[test]
fn test_empty_dataset_is_rejected() {
    let model = WineRegressor::with_seed(0).unwrap();
    let features = zeros(&[0, FEATURE_COUNT]).unwrap();
    let labels = zeros(&[0]).unwrap();
    let result = train_on_tensors(&model, &features, &labels, &quiet_config(1, 8));
    assert!(matches!(result, Err(WineError::EmptyDataset)));
}

#[test]
fn test_zero_batch_size_is_rejected() {
    let model = WineRegressor::with_seed(0).unwrap();
    let features = zeros(&[2, FEATURE_COUNT]).unwrap();
    let labels = zeros(&[2]).unwrap();
    let result = train_on_tensors(&model, &features, &labels, &quiet_config(1, 0));
    assert!(matches!(result, Err(WineError::Deep(_))));
}

#[test]
fn test_train_writes_checkpoint() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let train_path = dir.path().join("train.csv");
    write_partition(&train_path, 6);
    let checkpoint = dir.path().join("models").join("model.json");
    let config = TrainConfig {
        checkpoint: Some(checkpoint.clone()),
        ..quiet_config(2, 4)
    };

    let (model, report) = train(&train_path, &config).unwrap();
    assert_eq!(report.samples, 6);
    assert_eq!(report.epoch_losses.len(), 2);
    assert!(checkpoint.is_file());

    let restored = WineRegressor::with_seed(99).unwrap();
    load_state_dict(&restored, &checkpoint).unwrap();
    for (a, b) in model.parameters().iter().zip(restored.parameters()) {
        assert_eq!(a.to_vec(), b.to_vec());
    }
}
