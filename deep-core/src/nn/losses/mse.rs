use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::check_same_shape;
use crate::tensor::Tensor;

/// Specifies the reduction to apply to the squared errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

/// Computes the Mean Squared Error between input and target tensors.
///
/// The whole loss is recorded as a single `MseLossBackward` node whose inputs are
/// `[input, target]`.
#[derive(Debug, Clone, Default)]
pub struct MSELoss {
    reduction: Reduction,
}

impl MSELoss {
    pub fn new(reduction: Reduction) -> Self {
        MSELoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Returns the reduced loss as a 0-dimensional tensor.
    ///
    /// # Errors
    /// * `ShapeMismatch` if `input` and `target` shapes differ.
    /// * `UnsupportedOperation` for a mean over zero elements.
    pub fn calculate(&self, input: &Tensor, target: &Tensor) -> Result<Tensor, DeepError> {
        check_same_shape(input, target, "MSELoss calculate")?;
        let numel = input.numel();
        if numel == 0 && self.reduction == Reduction::Mean {
            return Err(DeepError::UnsupportedOperation(
                "mean squared error of empty tensors".to_string(),
            ));
        }

        let total: f32 = {
            let x = input.read_data();
            let y = target.read_data();
            x.data
                .iter()
                .zip(y.data.iter())
                .map(|(&a, &b)| (a - b) * (a - b))
                .sum()
        };
        let value = match self.reduction {
            Reduction::Mean => total / numel as f32,
            Reduction::Sum => total,
        };

        let result = Tensor::from_raw(vec![value], vec![]);
        let reduction = self.reduction;
        Ok(record_op(result, &[input, target], || {
            Arc::new(MseLossBackward {
                input: input.clone(),
                target: target.clone(),
                reduction,
            })
        }))
    }
}

#[derive(Debug)]
struct MseLossBackward {
    input: Tensor,
    target: Tensor,
    reduction: Reduction,
}

impl BackwardOp for MseLossBackward {
    fn name(&self) -> &'static str {
        "MseLossBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone(), self.target.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        let g = grad_output.item()?;
        let x = self.input.read_data();
        let y = self.target.read_data();
        let scale = match self.reduction {
            Reduction::Mean => 2.0 * g / x.data.len() as f32,
            Reduction::Sum => 2.0 * g,
        };
        let grad_input: Vec<f32> = x
            .data
            .iter()
            .zip(y.data.iter())
            .map(|(&a, &b)| scale * (a - b))
            .collect();
        let grad_target = grad_input.iter().map(|v| -v).collect();
        Ok(vec![
            Tensor::from_raw(grad_input, x.shape.clone()),
            Tensor::from_raw(grad_target, y.shape.clone()),
        ])
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
