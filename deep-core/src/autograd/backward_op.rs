use std::fmt::Debug;

use crate::error::DeepError;
use crate::tensor::Tensor;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` (a tensor resulting from an operation
/// on inputs that require gradients) has an associated `BackwardOp` implementation.
/// It is stored in the output tensor's `grad_fn` field and is used during the
/// `backward()` call to propagate gradients according to the chain rule.
///
/// The trait requires `Debug + Send + Sync` because nodes are shared through `Arc` and
/// tensors themselves are `Send + Sync`.
pub trait BackwardOp: Debug + Send + Sync {
    /// Kind label of the node, e.g. `"AddmmBackward"`.
    fn name(&self) -> &'static str;

    /// The tensors that participated in the forward operation, in argument order.
    ///
    /// These are the links from this node back to its predecessors. Every input is
    /// returned, including the ones that do not require gradients; the engine and the
    /// graph introspection decide what to do with them.
    fn inputs(&self) -> Vec<Tensor>;

    /// Computes the gradients of the inputs given the gradient of the output.
    ///
    /// # Returns
    /// One gradient per input, in the same order as `inputs()`, each with the shape of
    /// the corresponding input. Returned tensors never require gradients.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError>;
}
