use std::fmt::Debug;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::DeepError;
use crate::tensor::Tensor;

/// Internal storage and metadata for a Tensor.
///
/// Holds the row-major `f32` buffer, the shape, and the autograd state.
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct
/// to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData {
    /// Flattened elements in row-major (C) order.
    pub(crate) data: Vec<f32>,
    /// The shape (dimensions) of the tensor. Empty for scalars.
    pub(crate) shape: Vec<usize>,

    /// If true, operations involving this tensor are recorded in the backward graph.
    pub(crate) requires_grad: bool,
    /// Gradient accumulated by `backward()`. Only populated for leaves.
    pub(crate) grad: Option<Tensor>,
    /// The backward node of the operation that produced this tensor.
    /// Leaf tensors (created directly by the user) have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new `TensorData` from flattened data and a shape.
    ///
    /// # Errors
    /// Returns `DeepError::TensorCreationError` if the length of `data` does not match
    /// the number of elements described by `shape`.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, DeepError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(DeepError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(TensorData {
            data,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Calculates the flat offset for multi-dimensional indices.
    /// Panics if the number of indices doesn't match the rank or an index is out of bounds.
    pub fn get_offset(&self, indices: &[usize]) -> usize {
        assert_eq!(
            indices.len(),
            self.shape.len(),
            "Number of indices ({}) does not match tensor rank ({}) for shape {:?}",
            indices.len(),
            self.shape.len(),
            self.shape
        );
        let mut offset = 0;
        for (i, (&index, &dim)) in indices.iter().zip(self.shape.iter()).enumerate() {
            assert!(
                index < dim,
                "Index {} is out of bounds for dimension {} with size {} (shape: {:?})",
                index,
                i,
                dim,
                self.shape
            );
            offset = offset * dim + index;
        }
        offset
    }
}
