use super::*;
use crate::collate::collate_tensors;
use crate::datasets::TensorDataset;
use crate::samplers::{RandomSampler, SequentialSampler};
use deep_core::Tensor;
use std::collections::HashSet;

fn labelled_dataset(n: usize) -> TensorDataset {
    let features: Vec<f32> = (0..n * 2).map(|v| v as f32).collect();
    let labels: Vec<f32> = (0..n).map(|v| v as f32).collect();
    TensorDataset::new(vec![
        Tensor::new(features, vec![n, 2]).unwrap(),
        Tensor::new(labels, vec![n]).unwrap(),
    ])
    .unwrap()
}

fn batch_labels(batch: Vec<Vec<Tensor>>) -> Vec<f32> {
    collate_tensors(batch).unwrap()[1].to_vec()
}

#[test]
fn test_dataloader_sequential_batches() {
    let loader = DataLoader::new(labelled_dataset(5), 2, SequentialSampler::new(), false).unwrap();
    assert_eq!(loader.num_batches(), 3);
    let batches: Vec<Vec<f32>> = loader.iter().map(|b| batch_labels(b.unwrap())).collect();
    assert_eq!(batches, vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0]]);
}

#[test]
fn test_dataloader_drop_last() {
    let loader = DataLoader::new(labelled_dataset(5), 2, SequentialSampler::new(), true).unwrap();
    assert_eq!(loader.num_batches(), 2);
    assert_eq!(loader.iter().count(), 2);
}

#[test]
fn test_dataloader_batch_larger_than_dataset() {
    let loader = DataLoader::new(labelled_dataset(2), 64, SequentialSampler::new(), false).unwrap();
    let batches: Vec<_> = loader.iter().collect();
    assert_eq!(batches.len(), 1);
    let columns = collate_tensors(batches.into_iter().next().unwrap().unwrap()).unwrap();
    assert_eq!(columns[0].shape(), vec![2, 2]);
}

#[test]
fn test_dataloader_zero_batch_size() {
    assert!(DataLoader::new(labelled_dataset(2), 0, SequentialSampler::new(), false).is_err());
}

#[test]
fn test_dataloader_empty_dataset() {
    let dataset = TensorDataset::new(vec![]).unwrap();
    let loader = DataLoader::new(dataset, 4, RandomSampler::new(false, None), false).unwrap();
    assert_eq!(loader.num_batches(), 0);
    assert_eq!(loader.iter().count(), 0);
}

#[test]
fn test_dataloader_shuffled_epochs_cover_dataset() {
    let loader = DataLoader::new(labelled_dataset(10), 3, RandomSampler::with_seed(5), false).unwrap();
    let mut orders = Vec::new();
    for _ in 0..2 {
        let mut seen = Vec::new();
        for batch in &loader {
            seen.extend(batch_labels(batch.unwrap()));
        }
        let unique: HashSet<u32> = seen.iter().map(|&v| v as u32).collect();
        assert_eq!(unique.len(), 10);
        orders.push(seen);
    }
    assert_ne!(orders[0], orders[1]);
}
