use rand::Rng;

use crate::error::DeepError;
use crate::nn::init::{fan_in_bound, uniform_};
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::linalg::{addmm_op, matmul_op};
use crate::tensor::{zeros, Tensor};

/// Applies a linear transformation to the incoming data: `y = x * W^T + b`.
///
/// `W` has shape `[out_features, in_features]` and `b` has shape `[out_features]`.
/// Both are initialised uniformly in `±1/sqrt(in_features)`.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a new Linear layer initialised from the thread-local RNG.
    pub fn new(in_features: usize, out_features: usize, has_bias: bool) -> Result<Self, DeepError> {
        Self::with_rng(in_features, out_features, has_bias, &mut rand::thread_rng())
    }

    /// Creates a new Linear layer drawing its initial values from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, DeepError> {
        let bound = fan_in_bound(in_features)?;

        let weight_tensor = zeros(&[out_features, in_features])?;
        uniform_(&weight_tensor, -bound, bound, rng)?;
        let weight = Parameter::new(weight_tensor, "weight");

        let bias = if has_bias {
            let bias_tensor = zeros(&[out_features])?;
            uniform_(&bias_tensor, -bound, bound, rng)?;
            Some(Parameter::new(bias_tensor, "bias"))
        } else {
            None
        };

        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    /// `input` must be `[batch, in_features]`; the output is `[batch, out_features]`.
    fn forward(&self, input: &Tensor) -> Result<Tensor, DeepError> {
        let shape = input.shape();
        if shape.len() != 2 || shape[1] != self.in_features {
            let batch = shape.first().copied().unwrap_or(0);
            return Err(DeepError::ShapeMismatch {
                expected: vec![batch, self.in_features],
                actual: shape,
                operation: "Linear forward".to_string(),
            });
        }
        let weight_t = self.weight.t()?;
        match &self.bias {
            Some(bias) => addmm_op(bias, input, &weight_t),
            None => matmul_op(input, &weight_t),
        }
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        params.extend(self.bias.as_ref());
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = vec![("weight".to_string(), &self.weight)];
        if let Some(bias) = &self.bias {
            params.push(("bias".to_string(), bias));
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
