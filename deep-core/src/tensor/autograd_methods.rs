use std::collections::HashMap;
use std::sync::Arc;

use crate::autograd::graph::topological_sort;
use crate::autograd::BackwardOp;
use crate::error::DeepError;
use crate::tensor::create::full;
use crate::tensor::Tensor;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag for this tensor.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), DeepError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            log::warn!(
                "Changing requires_grad on a non-leaf tensor; gradients never accumulate on non-leaves. Did you mean to use .detach()?"
            );
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// A leaf is a tensor that was not produced by a recorded operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// Returns a handle to the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Drops the accumulated gradient.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }

    /// Returns the backward node that produced this tensor.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Returns a new leaf tensor with a copy of the values and no autograd history.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Tensor::from_raw(guard.data.clone(), guard.shape.clone())
    }

    /// Adds `grad_to_add` to this tensor's `grad` field.
    pub fn acc_grad(&self, grad_to_add: &Tensor) -> Result<(), DeepError> {
        let mut guard = self.write_data();
        let incoming_shape = grad_to_add.shape();
        if incoming_shape != guard.shape {
            return Err(DeepError::ShapeMismatch {
                expected: guard.shape.clone(),
                actual: incoming_shape,
                operation: "acc_grad".to_string(),
            });
        }
        let summed = match guard.grad.as_ref() {
            Some(existing) => add_detached(existing, grad_to_add)?,
            None => grad_to_add.detach(),
        };
        guard.grad = Some(summed);
        Ok(())
    }

    /// Performs the backward pass starting from this tensor.
    ///
    /// # Arguments
    /// * `gradient`: gradient of the final objective with respect to this tensor. If
    ///   `None`, the tensor must hold exactly one element and the gradient is `1`.
    ///
    /// Gradients are accumulated into the `grad` field of every leaf that requires
    /// gradients. Calling `backward` on a tensor that does not require gradients is a
    /// no-op.
    ///
    /// # Errors
    /// * `BackwardNonScalar` if `gradient` is `None` and the tensor has several elements.
    /// * `ShapeMismatch` if `gradient` has the wrong shape.
    /// * Any error raised by a node's `backward`.
    pub fn backward(&self, gradient: Option<&Tensor>) -> Result<(), DeepError> {
        if !self.requires_grad() {
            return Ok(());
        }

        let grad_init = match gradient {
            Some(g) => {
                if g.shape() != self.shape() {
                    return Err(DeepError::ShapeMismatch {
                        expected: self.shape(),
                        actual: g.shape(),
                        operation: "backward (initial gradient)".to_string(),
                    });
                }
                g.detach()
            }
            None => {
                if self.numel() != 1 {
                    return Err(DeepError::BackwardNonScalar);
                }
                full(&self.shape(), 1.0)?
            }
        };

        // Gradients flowing into each node, keyed by node id.
        let mut grad_map: HashMap<usize, Tensor> = HashMap::new();
        grad_map.insert(self.node_id(), grad_init);

        let sorted_nodes = topological_sort(self);
        log::trace!("backward over {} nodes", sorted_nodes.len());

        for node in sorted_nodes.iter().rev() {
            let Some(accumulated_grad) = grad_map.remove(&node.node_id()) else {
                continue;
            };

            let Some(grad_fn) = node.grad_fn() else {
                if node.requires_grad() {
                    node.acc_grad(&accumulated_grad)?;
                }
                continue;
            };

            let inputs = grad_fn.inputs();
            let input_grads = grad_fn.backward(&accumulated_grad)?;
            if input_grads.len() != inputs.len() {
                return Err(DeepError::BackwardError(format!(
                    "{} returned {} gradients, but has {} inputs",
                    grad_fn.name(),
                    input_grads.len(),
                    inputs.len()
                )));
            }

            for (input, grad) in inputs.iter().zip(input_grads) {
                if !input.requires_grad() {
                    continue;
                }
                if grad.shape() != input.shape() {
                    return Err(DeepError::ShapeMismatch {
                        expected: input.shape(),
                        actual: grad.shape(),
                        operation: format!("{} gradient", grad_fn.name()),
                    });
                }
                let summed = match grad_map.remove(&input.node_id()) {
                    Some(existing) => add_detached(&existing, &grad)?,
                    None => grad,
                };
                grad_map.insert(input.node_id(), summed);
            }
        }

        Ok(())
    }
}

/// Element-wise sum of two same-shaped tensors, without recording anything.
fn add_detached(a: &Tensor, b: &Tensor) -> Result<Tensor, DeepError> {
    let a_guard = a.read_data();
    let b_guard = b.read_data();
    if a_guard.shape != b_guard.shape {
        return Err(DeepError::ShapeMismatch {
            expected: a_guard.shape.clone(),
            actual: b_guard.shape.clone(),
            operation: "gradient accumulation".to_string(),
        });
    }
    let data = a_guard
        .data
        .iter()
        .zip(b_guard.data.iter())
        .map(|(x, y)| x + y)
        .collect();
    Ok(Tensor::from_raw(data, a_guard.shape.clone()))
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
