use std::collections::HashMap;

use crate::error::DeepError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_trait::Optimizer;

/// Implements Stochastic Gradient Descent with optional momentum and weight decay.
///
/// For each parameter `p` with gradient `g`:
///
/// ```text
/// d   = g + weight_decay * p
/// buf = d                       (first step)
/// buf = momentum * buf + d      (later steps)
/// p   = p - lr * buf
/// ```
///
/// With `momentum == 0` the update is plain `p - lr * d`.
#[derive(Debug)]
pub struct SgdOptimizer {
    params: Vec<Parameter>,
    lr: f32,
    momentum: f32,
    weight_decay: f32,
    // Keyed by Tensor::node_id of the parameter.
    momentum_buffers: HashMap<usize, Vec<f32>>,
}

impl SgdOptimizer {
    /// Creates a new `SgdOptimizer` over `params`.
    ///
    /// # Errors
    /// `InvalidHyperparameter` if `lr` is not positive, `momentum` is outside `[0, 1]`,
    /// or `weight_decay` is negative.
    pub fn new(
        params: impl IntoIterator<Item = Parameter>,
        lr: f32,
        momentum: f32,
        weight_decay: f32,
    ) -> Result<Self, DeepError> {
        if lr.is_nan() || lr <= 0.0 {
            return Err(invalid("lr", format!("must be positive, got {}", lr)));
        }
        if !(0.0..=1.0).contains(&momentum) {
            return Err(invalid("momentum", format!("must be in [0, 1], got {}", momentum)));
        }
        if weight_decay.is_nan() || weight_decay < 0.0 {
            return Err(invalid(
                "weight_decay",
                format!("must be non-negative, got {}", weight_decay),
            ));
        }
        Ok(SgdOptimizer {
            params: params.into_iter().collect(),
            lr,
            momentum,
            weight_decay,
            momentum_buffers: HashMap::new(),
        })
    }

    pub fn lr(&self) -> f32 {
        self.lr
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }
}

fn invalid(name: &str, reason: String) -> DeepError {
    DeepError::InvalidHyperparameter {
        name: name.to_string(),
        reason,
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self) -> Result<(), DeepError> {
        for param in &self.params {
            let Some(grad) = param.grad() else {
                continue;
            };
            let mut values = param.to_vec();
            let mut d_p = grad.to_vec();
            if d_p.len() != values.len() {
                return Err(DeepError::ShapeMismatch {
                    expected: param.shape(),
                    actual: grad.shape(),
                    operation: "SGD step".to_string(),
                });
            }

            if self.weight_decay != 0.0 {
                for (d, &p) in d_p.iter_mut().zip(values.iter()) {
                    *d += self.weight_decay * p;
                }
            }

            if self.momentum != 0.0 {
                let momentum = self.momentum;
                let buffer = self
                    .momentum_buffers
                    .entry(param.node_id())
                    .and_modify(|buf| {
                        for (b, &d) in buf.iter_mut().zip(d_p.iter()) {
                            *b = momentum * *b + d;
                        }
                    })
                    .or_insert_with(|| d_p.clone());
                d_p.clone_from(buffer);
            }

            for (p, &d) in values.iter_mut().zip(d_p.iter()) {
                *p -= self.lr * d;
            }
            param.assign_data(values)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.clear_grad();
        }
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
