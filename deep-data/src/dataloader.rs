//! Batching over a [`Dataset`] in the order chosen by a [`Sampler`].
//!
//! ```rust
//! use deep_core::Tensor;
//! use deep_data::{collate_tensors, DataLoader, SequentialSampler, TensorDataset};
//!
//! let features = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
//! let labels = Tensor::new(vec![0.0, 1.0, 0.0], vec![3]).unwrap();
//! let dataset = TensorDataset::new(vec![features, labels]).unwrap();
//! let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false).unwrap();
//! for batch in loader.iter() {
//!     let columns = collate_tensors(batch.unwrap()).unwrap();
//!     assert_eq!(columns[0].shape()[1], 2);
//! }
//! ```

use deep_core::DeepError;

use crate::datasets::Dataset;
use crate::samplers::Sampler;

/// Groups dataset items into batches of `batch_size`.
///
/// The loader itself is reusable: every call to [`DataLoader::iter`] asks the sampler
/// for a new index order, so one call corresponds to one epoch.
#[derive(Debug)]
pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a new DataLoader.
    ///
    /// If `drop_last` is true, a final batch smaller than `batch_size` is skipped.
    ///
    /// # Errors
    /// `InvalidHyperparameter` if `batch_size` is 0.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, DeepError> {
        if batch_size == 0 {
            return Err(DeepError::InvalidHyperparameter {
                name: "batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches one call to `iter` yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    /// Starts a new pass over the dataset.
    pub fn iter(&self) -> Batches<'_, D> {
        Batches {
            dataset: &self.dataset,
            indices: self.sampler.iter(self.dataset.len()),
            batch_size: self.batch_size,
            drop_last: self.drop_last,
        }
    }
}

impl<'a, D: Dataset, S: Sampler> IntoIterator for &'a DataLoader<D, S> {
    type Item = Result<Vec<D::Item>, DeepError>;
    type IntoIter = Batches<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the batches of one epoch.
pub struct Batches<'a, D: Dataset> {
    dataset: &'a D,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
    batch_size: usize,
    drop_last: bool,
}

impl<'a, D: Dataset> Iterator for Batches<'a, D> {
    type Item = Result<Vec<D::Item>, DeepError>;

    /// Returns `Some(Err(_))` if fetching an item fails, `None` once the sampler is
    /// exhausted.
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for idx in self.indices.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(item) => batch.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        Some(Ok(batch))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
