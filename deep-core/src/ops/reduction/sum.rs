use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::tensor::Tensor;

/// Sum of all elements, as a 0-dimensional tensor.
pub fn sum_op(input: &Tensor) -> Result<Tensor, DeepError> {
    let total: f32 = input.read_data().data.iter().sum();
    let result = Tensor::from_raw(vec![total], vec![]);
    Ok(record_op(result, &[input], || {
        Arc::new(SumBackward {
            input: input.clone(),
        })
    }))
}

#[derive(Debug)]
struct SumBackward {
    input: Tensor,
}

impl BackwardOp for SumBackward {
    fn name(&self) -> &'static str {
        "SumBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        let g = grad_output.item()?;
        let shape = self.input.shape();
        let numel = shape.iter().product();
        Ok(vec![Tensor::from_raw(vec![g; numel], shape)])
    }
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
