//! Reverse-mode automatic differentiation.
//!
//! Forward operations record a [`BackwardOp`] node on their output whenever one of their
//! inputs requires gradients. [`Tensor::backward`](crate::Tensor::backward) walks those
//! nodes in reverse topological order; [`graph`] and [`visualize`] expose the same nodes
//! for inspection.

pub mod backward_op;
pub mod grad_check;
pub mod grad_mode;
pub mod graph;
pub mod visualize;

use std::sync::Arc;

pub use backward_op::BackwardOp;
pub use grad_check::{check_grad, GradCheckError};
pub use grad_mode::{is_grad_enabled, no_grad, NoGradGuard};
pub use graph::{topological_sort, GraphNode};
pub use visualize::{count_nodes, print_graph, render_graph, to_dot};

use crate::tensor::Tensor;

/// Marks `result` as the output of `grad_fn` if any of `inputs` requires gradients and
/// recording is enabled on this thread.
///
/// The closure is only evaluated when a node is actually needed, so forward passes on
/// data that does not track gradients do not allocate backward state.
pub(crate) fn record_op<F>(result: Tensor, inputs: &[&Tensor], grad_fn: F) -> Tensor
where
    F: FnOnce() -> Arc<dyn BackwardOp>,
{
    if is_grad_enabled() && inputs.iter().any(|t| t.requires_grad()) {
        let mut guard = result.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(grad_fn());
    }
    result
}
