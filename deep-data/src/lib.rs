//! Datasets, samplers and batching for `deep-core` tensors.

pub mod collate;
pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use collate::collate_tensors;
pub use dataloader::DataLoader;
pub use datasets::{Dataset, TensorDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
