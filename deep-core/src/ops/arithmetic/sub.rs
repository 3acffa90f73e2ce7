use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::arithmetic::{map, zip_map};
use crate::tensor::Tensor;

/// Element-wise subtraction `a - b` of two tensors of the same shape.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DeepError> {
    let result = zip_map(a, b, "sub", |x, y| x - y)?;
    Ok(record_op(result, &[a, b], || {
        Arc::new(SubBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for SubBackward {
    fn name(&self) -> &'static str {
        "SubBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        Ok(vec![grad_output.detach(), map(grad_output, |g| -g)])
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
