use thiserror::Error;

use crate::error::DeepError;
use crate::tensor::Tensor;

/// Failure modes of [`check_grad`].
#[derive(Error, Debug)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical} != numerical {numerical} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },
    #[error("Gradient check input {input_index} must be a leaf tensor")]
    InputNotLeaf { input_index: usize },
    #[error("Input {input_index} requires grad but has no gradient after backward")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Function did not propagate requires_grad to its output")]
    RequiresGradPropagationError,
    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] DeepError),
}

/// Checks analytical gradients against central finite differences.
///
/// The scalar objective is `sum(func(inputs) * output_grad)`, so the analytical
/// gradient of each input is whatever `backward(Some(output_grad))` accumulates.
/// Elements are compared with `|a - n| <= tolerance * max(1, |a|, |n|)`.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, DeepError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.clear_grad();
    }

    let output = func(inputs)?;
    if inputs.iter().any(|t| t.requires_grad()) && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    output.backward(Some(output_grad))?;

    let weights = output_grad.to_vec();
    let objective = |inputs: &[Tensor]| -> Result<f64, DeepError> {
        let out = func(inputs)?.to_vec();
        Ok(out
            .iter()
            .zip(weights.iter())
            .map(|(&o, &w)| o as f64 * w as f64)
            .sum())
    };

    for (input_index, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical = input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index })?
            .to_vec();
        let original = input.to_vec();

        for element_index in 0..original.len() {
            let mut perturbed = original.clone();
            perturbed[element_index] = (original[element_index] as f64 + epsilon) as f32;
            input.assign_data(perturbed.clone())?;
            let plus = objective(inputs)?;
            perturbed[element_index] = (original[element_index] as f64 - epsilon) as f32;
            input.assign_data(perturbed)?;
            let minus = objective(inputs)?;
            input.assign_data(original.clone())?;

            let numerical = (plus - minus) / (2.0 * epsilon);
            let a = analytical[element_index] as f64;
            let difference = (a - numerical).abs();
            if difference > tolerance * 1f64.max(a.abs()).max(numerical.abs()) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical: a,
                    numerical,
                    difference,
                });
            }
        }
    }
    Ok(())
}
