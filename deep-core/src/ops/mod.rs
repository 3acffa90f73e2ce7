//! Tensor operations.
//!
//! Every differentiable operation is a free function `xxx_op` that validates its
//! arguments, computes the forward result, and records a backward node through
//! [`record_op`](crate::autograd::record_op). The `Tensor` methods of the same name are
//! thin wrappers around these functions.

pub mod activation;
pub mod arithmetic;
pub mod indexing;
pub mod linalg;
pub mod reduction;
pub mod stack;
pub mod view;

use crate::error::DeepError;
use crate::tensor::Tensor;

/// Returns `ShapeMismatch` unless `a` and `b` have identical shapes.
pub(crate) fn check_same_shape(a: &Tensor, b: &Tensor, operation: &str) -> Result<(), DeepError> {
    let (a_shape, b_shape) = (a.shape(), b.shape());
    if a_shape != b_shape {
        return Err(DeepError::ShapeMismatch {
            expected: a_shape,
            actual: b_shape,
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// Returns `RankMismatch` unless `t` has exactly `rank` dimensions.
pub(crate) fn check_rank(t: &Tensor, rank: usize) -> Result<(), DeepError> {
    let actual = t.rank();
    if actual != rank {
        return Err(DeepError::RankMismatch {
            expected: rank,
            actual,
        });
    }
    Ok(())
}
