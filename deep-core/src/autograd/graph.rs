use std::collections::HashSet;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::tensor::Tensor;

/// Builds a topological ordering of the tensors reachable from `root` through `grad_fn` links.
///
/// Inputs always come before the tensors computed from them, so iterating the result in
/// reverse visits every node after all of its consumers. Inputs that do not require
/// gradients are not part of the ordering.
pub fn topological_sort(root: &Tensor) -> Vec<Tensor> {
    let mut visited = HashSet::new();
    let mut sorted = Vec::new();
    build_topo(root, &mut visited, &mut sorted);
    sorted
}

fn build_topo(node: &Tensor, visited: &mut HashSet<usize>, sorted: &mut Vec<Tensor>) {
    if !visited.insert(node.node_id()) {
        return;
    }
    if let Some(grad_fn) = node.grad_fn() {
        for input in grad_fn.inputs() {
            if input.requires_grad() {
                build_topo(&input, visited, sorted);
            }
        }
    }
    sorted.push(node.clone());
}

/// A node of the backward graph, as seen from the outside.
///
/// Function nodes are the recorded operations. A leaf tensor that requires gradients is
/// represented by an `AccumulateGrad` node: the place where its gradient ends up.
#[derive(Debug, Clone)]
pub enum GraphNode {
    Function(Arc<dyn BackwardOp>),
    AccumulateGrad(Tensor),
}

impl GraphNode {
    /// The root node of a result tensor: its `grad_fn`, if any.
    pub fn root(tensor: &Tensor) -> Option<GraphNode> {
        tensor.grad_fn().map(GraphNode::Function)
    }

    /// The node a consumer links to for `tensor`.
    ///
    /// `None` when the tensor does not take part in differentiation.
    pub fn of(tensor: &Tensor) -> Option<GraphNode> {
        if let Some(op) = tensor.grad_fn() {
            Some(GraphNode::Function(op))
        } else if tensor.requires_grad() {
            Some(GraphNode::AccumulateGrad(tensor.clone()))
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GraphNode::Function(op) => op.name(),
            GraphNode::AccumulateGrad(_) => "AccumulateGrad",
        }
    }

    /// Predecessor slots, one per input of the operation. Empty slots are inputs that
    /// do not require gradients. `AccumulateGrad` nodes have no predecessors.
    pub fn next_functions(&self) -> Vec<Option<GraphNode>> {
        match self {
            GraphNode::Function(op) => op.inputs().iter().map(GraphNode::of).collect(),
            GraphNode::AccumulateGrad(_) => Vec::new(),
        }
    }

    /// Identity of the node, stable for as long as the graph is alive.
    pub fn id(&self) -> usize {
        match self {
            GraphNode::Function(op) => Arc::as_ptr(op) as *const () as usize,
            GraphNode::AccumulateGrad(tensor) => tensor.node_id(),
        }
    }

    /// The leaf tensor behind an `AccumulateGrad` node.
    pub fn variable(&self) -> Option<&Tensor> {
        match self {
            GraphNode::AccumulateGrad(tensor) => Some(tensor),
            GraphNode::Function(_) => None,
        }
    }
}
