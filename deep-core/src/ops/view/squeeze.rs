use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::tensor::Tensor;

/// Removes dimension `dim` if its size is 1. Any other size leaves the shape unchanged.
///
/// # Errors
/// `IndexOutOfBounds` if `dim` is not smaller than the rank.
pub fn squeeze_op(input: &Tensor, dim: usize) -> Result<Tensor, DeepError> {
    let guard = input.read_data();
    if dim >= guard.shape.len() {
        return Err(DeepError::IndexOutOfBounds {
            index: vec![dim],
            shape: guard.shape.clone(),
        });
    }
    let mut shape = guard.shape.clone();
    if shape[dim] == 1 {
        shape.remove(dim);
    }
    let result = Tensor::from_raw(guard.data.clone(), shape);
    drop(guard);
    Ok(record_op(result, &[input], || {
        Arc::new(SqueezeBackward {
            input: input.clone(),
        })
    }))
}

#[derive(Debug)]
struct SqueezeBackward {
    input: Tensor,
}

impl BackwardOp for SqueezeBackward {
    fn name(&self) -> &'static str {
        "SqueezeBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        Tensor::new(grad_output.to_vec(), self.input.shape()).map(|g| vec![g])
    }
}

#[cfg(test)]
#[path = "squeeze_test.rs"]
mod tests;
