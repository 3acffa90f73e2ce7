use crate::error::DeepError;
use crate::ops;
use crate::tensor::Tensor;

impl Tensor {
    pub fn add(&self, other: &Tensor) -> Result<Tensor, DeepError> {
        ops::arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, DeepError> {
        ops::arithmetic::sub_op(self, other)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, DeepError> {
        ops::arithmetic::mul_op(self, other)
    }

    pub fn mul_scalar(&self, factor: f32) -> Result<Tensor, DeepError> {
        ops::arithmetic::mul_scalar_op(self, factor)
    }

    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, DeepError> {
        ops::linalg::matmul_op(self, other)
    }

    /// 2-D transpose.
    pub fn t(&self) -> Result<Tensor, DeepError> {
        ops::linalg::transpose_op(self)
    }

    pub fn relu(&self) -> Result<Tensor, DeepError> {
        ops::activation::relu_op(self)
    }

    pub fn sum(&self) -> Result<Tensor, DeepError> {
        ops::reduction::sum_op(self)
    }

    pub fn mean(&self) -> Result<Tensor, DeepError> {
        ops::reduction::mean_op(self)
    }

    pub fn squeeze(&self, dim: usize) -> Result<Tensor, DeepError> {
        ops::view::squeeze_op(self, dim)
    }
}
