use std::sync::Arc;

use crate::autograd::{record_op, BackwardOp};
use crate::error::DeepError;
use crate::ops::check_rank;
use crate::ops::linalg::transpose_kernel;
use crate::tensor::Tensor;

/// Transpose of a 2-D tensor. The result owns a fresh row-major buffer.
pub fn transpose_op(t: &Tensor) -> Result<Tensor, DeepError> {
    check_rank(t, 2)?;
    let shape = t.shape();
    let data = transpose_kernel(&t.read_data().data, shape[0], shape[1]);
    let result = Tensor::from_raw(data, vec![shape[1], shape[0]]);
    Ok(record_op(result, &[t], || {
        Arc::new(TBackward { input: t.clone() })
    }))
}

#[derive(Debug)]
struct TBackward {
    input: Tensor,
}

impl BackwardOp for TBackward {
    fn name(&self) -> &'static str {
        "TBackward"
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DeepError> {
        let shape = grad_output.shape();
        let data = transpose_kernel(&grad_output.read_data().data, shape[0], shape[1]);
        Ok(vec![Tensor::from_raw(data, vec![shape[1], shape[0]])])
    }
}
