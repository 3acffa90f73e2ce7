use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::arithmetic::{map, zip_map};
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Applies the Rectified Linear Unit element-wise: `relu(x) = max(0, x)`.
pub fn relu_op(input: &Tensor) -> Result<Tensor, DeepError> {
    let result = map(input, |x| if x > 0.0 { x } else { 0.0 });
    Ok(record_op(result, &[input], || {
        Arc::new(ReluBackward {
            input: input.clone(),
        })
    }))
}

// --- Backward Operation ---

#[derive(Debug)]
struct ReluBackward {
    input: Tensor,
}

impl BackwardOp for ReluBackward {
    fn name(&self) -> &'static str {
        "ReluBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        // The subgradient at 0 is taken as 0.
        let grad = zip_map(grad_output, &self.input, "ReluBackward", |g, x| {
            if x > 0.0 {
                g
            } else {
                0.0
            }
        })?;
        Ok(vec![grad])
    }
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
