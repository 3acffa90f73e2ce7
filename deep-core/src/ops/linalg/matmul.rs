use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::check_rank;
use crate::ops::linalg::{matmul_kernel, transpose_kernel};
use crate::tensor::Tensor;

/// Matrix product of a `[m, k]` and a `[k, n]` tensor.
///
/// # Errors
/// * `RankMismatch` if either operand is not 2-D.
/// * `IncompatibleShapes` if the inner dimensions differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DeepError> {
    check_rank(a, 2)?;
    check_rank(b, 2)?;
    let (a_shape, b_shape) = (a.shape(), b.shape());
    if a_shape[1] != b_shape[0] {
        return Err(DeepError::IncompatibleShapes {
            shape1: a_shape,
            shape2: b_shape,
            operation: "matmul".to_string(),
        });
    }
    let (m, k, n) = (a_shape[0], a_shape[1], b_shape[1]);
    let data = matmul_kernel(&a.read_data().data, &b.read_data().data, m, k, n);
    let result = Tensor::from_raw(data, vec![m, n]);
    Ok(record_op(result, &[a, b], || {
        Arc::new(MmBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[derive(Debug)]
struct MmBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MmBackward {
    fn name(&self) -> &'static str {
        "MmBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        let (a_shape, b_shape) = (self.a.shape(), self.b.shape());
        let (m, k, n) = (a_shape[0], a_shape[1], b_shape[1]);
        let g = grad_output.read_data();
        let a = self.a.read_data();
        let b = self.b.read_data();

        // dA = G * B^T, dB = A^T * G
        let b_t = transpose_kernel(&b.data, k, n);
        let grad_a = matmul_kernel(&g.data, &b_t, m, n, k);
        let a_t = transpose_kernel(&a.data, m, k);
        let grad_b = matmul_kernel(&a_t, &g.data, k, m, n);

        Ok(vec![
            Tensor::from_raw(grad_a, a_shape),
            Tensor::from_raw(grad_b, b_shape),
        ])
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
