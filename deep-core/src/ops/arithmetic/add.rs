use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::arithmetic::zip_map;
use crate::tensor::Tensor;

/// Element-wise addition of two tensors of the same shape.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DeepError> {
    let result = zip_map(a, b, "add", |x, y| x + y)?;
    Ok(record_op(result, &[a, b], || {
        Arc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for AddBackward {
    fn name(&self) -> &'static str {
        "AddBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        Ok(vec![grad_output.detach(), grad_output.detach()])
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
