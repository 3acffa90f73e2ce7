use deep_core::ops::indexing::select_row;
use deep_core::{DeepError, Tensor};

use super::traits::Dataset;

/// A dataset composed of one or more tensors sharing their first dimension.
///
/// `get(index)` returns one tensor per wrapped tensor: row `index` along the first
/// dimension, with that dimension removed. A `[N]` label tensor therefore yields
/// scalars and a `[N, F]` feature tensor yields `[F]` rows.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    tensors: Vec<Tensor>,
    length: usize,
}

impl TensorDataset {
    /// Creates a new `TensorDataset` from a vector of tensors.
    ///
    /// An empty vector gives an empty dataset.
    ///
    /// # Errors
    ///
    /// Returns `DeepError::RankMismatch` if any tensor is a scalar, and
    /// `DeepError::ShapeMismatch` if the first dimensions differ.
    pub fn new(tensors: Vec<Tensor>) -> Result<Self, DeepError> {
        let Some(first) = tensors.first() else {
            return Ok(Self {
                tensors,
                length: 0,
            });
        };
        let first_shape = first.shape();
        if first_shape.is_empty() {
            return Err(DeepError::RankMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let expected_len = first_shape[0];

        for tensor in tensors.iter().skip(1) {
            let shape = tensor.shape();
            if shape.is_empty() {
                return Err(DeepError::RankMismatch {
                    expected: 1,
                    actual: 0,
                });
            }
            if shape[0] != expected_len {
                return Err(DeepError::ShapeMismatch {
                    expected: first_shape,
                    actual: shape,
                    operation: "TensorDataset::new".to_string(),
                });
            }
        }

        Ok(Self {
            tensors,
            length: expected_len,
        })
    }

    pub fn tensors(&self) -> &[Tensor] {
        &self.tensors
    }
}

impl Dataset for TensorDataset {
    type Item = Vec<Tensor>;

    fn get(&self, index: usize) -> Result<Self::Item, DeepError> {
        if index >= self.length {
            return Err(DeepError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.length],
            });
        }
        self.tensors
            .iter()
            .map(|tensor| select_row(tensor, index))
            .collect()
    }

    fn len(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
#[path = "tensor_dataset_test.rs"]
mod tests;
