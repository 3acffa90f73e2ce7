use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

use crate::error::DeepError;
use crate::tensor::Tensor;

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, DeepError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, DeepError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, DeepError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a zero tensor with the same shape as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, DeepError> {
    zeros(&tensor.shape())
}

/// Creates a 0-dimensional tensor holding `value`.
pub fn scalar(value: f32) -> Tensor {
    Tensor::from_raw(vec![value], vec![])
}

pub fn from_vec(data: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, DeepError> {
    Tensor::new(data, shape)
}

/// Creates a tensor with values drawn uniformly from `[low, high)`.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<Tensor, DeepError> {
    if low.is_nan() || high.is_nan() || low >= high {
        return Err(DeepError::InvalidHyperparameter {
            name: "uniform bounds".to_string(),
            reason: format!("low ({}) must be smaller than high ({})", low, high),
        });
    }
    let numel = shape.iter().product();
    let dist = Uniform::new(low, high);
    let data: Vec<f32> = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::new(data, shape.to_vec())
}

/// Creates a tensor with values drawn from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, DeepError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(&mut rng)).collect();
    Tensor::new(data, shape.to_vec())
}
