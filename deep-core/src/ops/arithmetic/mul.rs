use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::arithmetic::{map, zip_map};
use crate::tensor::Tensor;

/// Element-wise (Hadamard) product of two tensors of the same shape.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DeepError> {
    let result = zip_map(a, b, "mul", |x, y| x * y)?;
    Ok(record_op(result, &[a, b], || {
        Arc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

/// Multiplies every element by `factor`.
pub fn mul_scalar_op(a: &Tensor, factor: f32) -> Result<Tensor, DeepError> {
    let result = map(a, |x| x * factor);
    Ok(record_op(result, &[a], || {
        Arc::new(MulScalarBackward {
            input: a.clone(),
            factor,
        })
    }))
}

#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn name(&self) -> &'static str {
        "MulBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        // d(a*b)/da = b, d(a*b)/db = a
        let grad_a = zip_map(grad_output, &self.b, "MulBackward", |g, b| g * b)?;
        let grad_b = zip_map(grad_output, &self.a, "MulBackward", |g, a| g * a)?;
        Ok(vec![grad_a, grad_b])
    }
}

#[derive(Debug)]
struct MulScalarBackward {
    input: Tensor,
    factor: f32,
}

impl BackwardOp for MulScalarBackward {
    fn name(&self) -> &'static str {
        "MulBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        let factor = self.factor;
        Ok(vec![map(grad_output, |g| g * factor)])
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
