use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::DeepError;
use crate::tensor_data::TensorData;

mod autograd_methods;
pub mod create;
mod op_methods;

pub use create::{from_vec, full, ones, rand_uniform, randn, scalar, zeros, zeros_like};

/// Represents a dense, row-major, multi-dimensional array of `f32`.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** clones are cheap and point to the same data, which is how
///     backward nodes keep their inputs alive and how parameters are shared with optimizers.
/// 2.  **Interior Mutability:** autograd metadata (`requires_grad`, `grad`) and parameter
///     values can be updated through a shared reference.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new leaf tensor from flattened row-major data and a shape.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, DeepError> {
        let tensor_data = TensorData::new(data, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        })
    }

    /// Builds a tensor from parts whose consistency is guaranteed by the caller.
    pub(crate) fn from_raw(data: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Tensor {
            data: Arc::new(RwLock::new(TensorData {
                data,
                shape,
                requires_grad: false,
                grad: None,
                grad_fn: None,
            })),
        }
    }

    /// Acquires a read lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns a copy of the flattened elements.
    pub fn to_vec(&self) -> Vec<f32> {
        self.read_data().data.clone()
    }

    /// Returns the value of a single-element tensor.
    pub fn item(&self) -> Result<f32, DeepError> {
        let guard = self.read_data();
        if guard.data.len() != 1 {
            return Err(DeepError::ShapeMismatch {
                expected: vec![],
                actual: guard.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(guard.data[0])
    }

    /// Returns the element at the given multi-dimensional index.
    pub fn at(&self, indices: &[usize]) -> f32 {
        let guard = self.read_data();
        let offset = guard.get_offset(indices);
        guard.data[offset]
    }

    /// Overwrites the tensor's values in place, outside of autograd tracking.
    ///
    /// Used by optimizers and state-dict loading. The shape is kept.
    pub fn assign_data(&self, values: Vec<f32>) -> Result<(), DeepError> {
        let mut guard = self.write_data();
        if values.len() != guard.data.len() {
            return Err(DeepError::TensorCreationError {
                data_len: values.len(),
                shape: guard.shape.clone(),
            });
        }
        guard.data = values;
        Ok(())
    }

    /// Stable identity of the underlying storage, used as a graph node key.
    pub fn node_id(&self) -> usize {
        Arc::as_ptr(&self.data) as *const () as usize
    }

    /// True if both handles share the same storage.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Clone for Tensor {
    /// Shallow clone: the new handle shares data and autograd state.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        let mut s = f.debug_struct("Tensor");
        s.field("shape", &guard.shape);
        if guard.data.len() <= 16 {
            s.field("data", &guard.data);
        }
        s.field("requires_grad", &guard.requires_grad);
        if let Some(op) = guard.grad_fn.as_ref() {
            s.field("grad_fn", &op.name());
        }
        s.finish()
    }
}
