use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::check_rank;
use crate::ops::linalg::{matmul_kernel, transpose_kernel};
use crate::tensor::Tensor;

/// Fused affine map `input * mat2 + bias`, with `bias` broadcast over rows.
///
/// `input` is `[m, k]`, `mat2` is `[k, n]` and `bias` is `[n]`. The backward node keeps
/// its inputs in the order `[bias, input, mat2]`.
pub fn addmm_op(bias: &Tensor, input: &Tensor, mat2: &Tensor) -> Result<Tensor, DeepError> {
    check_rank(bias, 1)?;
    check_rank(input, 2)?;
    check_rank(mat2, 2)?;
    let (in_shape, w_shape, b_shape) = (input.shape(), mat2.shape(), bias.shape());
    if in_shape[1] != w_shape[0] {
        return Err(DeepError::IncompatibleShapes {
            shape1: in_shape,
            shape2: w_shape,
            operation: "addmm".to_string(),
        });
    }
    if b_shape[0] != w_shape[1] {
        return Err(DeepError::ShapeMismatch {
            expected: vec![w_shape[1]],
            actual: b_shape,
            operation: "addmm (bias)".to_string(),
        });
    }

    let (m, k, n) = (in_shape[0], in_shape[1], w_shape[1]);
    let mut data = matmul_kernel(&input.read_data().data, &mat2.read_data().data, m, k, n);
    // A zero-width output has no rows to offset; `chunks_mut(0)` would panic.
    if n > 0 {
        let bias_guard = bias.read_data();
        for row in data.chunks_mut(n) {
            for (o, &b) in row.iter_mut().zip(bias_guard.data.iter()) {
                *o += b;
            }
        }
    }
    let result = Tensor::from_raw(data, vec![m, n]);
    Ok(record_op(result, &[bias, input, mat2], || {
        Arc::new(AddmmBackward {
            bias: bias.clone(),
            input: input.clone(),
            mat2: mat2.clone(),
        })
    }))
}

#[derive(Debug)]
struct AddmmBackward {
    bias: Tensor,
    input: Tensor,
    mat2: Tensor,
}

impl BackwardOp for AddmmBackward {
    fn name(&self) -> &'static str {
        "AddmmBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.bias.clone(), self.input.clone(), self.mat2.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        let (in_shape, w_shape) = (self.input.shape(), self.mat2.shape());
        let (m, k, n) = (in_shape[0], in_shape[1], w_shape[1]);
        let g = grad_output.read_data();

        let mut grad_bias = vec![0.0f32; n];
        if n > 0 {
            for row in g.data.chunks(n) {
                for (acc, &v) in grad_bias.iter_mut().zip(row) {
                    *acc += v;
                }
            }
        }

        let w_t = transpose_kernel(&self.mat2.read_data().data, k, n);
        let grad_input = matmul_kernel(&g.data, &w_t, m, n, k);
        let x_t = transpose_kernel(&self.input.read_data().data, m, k);
        let grad_mat2 = matmul_kernel(&x_t, &g.data, k, m, n);

        Ok(vec![
            Tensor::from_raw(grad_bias, vec![n]),
            Tensor::from_raw(grad_input, in_shape),
            Tensor::from_raw(grad_mat2, w_shape),
        ])
    }
}

#[cfg(test)]
#[path = "addmm_test.rs"]
mod tests;
