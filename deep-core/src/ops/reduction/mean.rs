use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::tensor::Tensor;

/// Arithmetic mean of all elements, as a 0-dimensional tensor.
///
/// # Errors
/// `UnsupportedOperation` on an empty tensor.
pub fn mean_op(input: &Tensor) -> Result<Tensor, DeepError> {
    let numel = input.numel();
    if numel == 0 {
        return Err(DeepError::UnsupportedOperation(
            "mean of an empty tensor".to_string(),
        ));
    }
    let total: f32 = input.read_data().data.iter().sum();
    let result = Tensor::from_raw(vec![total / numel as f32], vec![]);
    Ok(record_op(result, &[input], || {
        Arc::new(MeanBackward {
            input: input.clone(),
        })
    }))
}

#[derive(Debug)]
struct MeanBackward {
    input: Tensor,
}

impl BackwardOp for MeanBackward {
    fn name(&self) -> &'static str {
        "MeanBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        let shape = self.input.shape();
        let numel: usize = shape.iter().product();
        let g = grad_output.item()? / numel as f32;
        Ok(vec![Tensor::from_raw(vec![g; numel], shape)])
    }
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
