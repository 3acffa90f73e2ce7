pub mod add;
pub mod mul;
pub mod sub;

pub use add::add_op;
pub use mul::{mul_op, mul_scalar_op};
pub use sub::sub_op;

use crate::error::DeepError;
use crate::ops::check_same_shape;
use crate::tensor::Tensor;

/// Applies `f` element-wise to two same-shaped tensors. Records nothing.
pub(crate) fn zip_map<F>(a: &Tensor, b: &Tensor, operation: &str, f: F) -> Result<Tensor, DeepError>
where
    F: Fn(f32, f32) -> f32,
{
    check_same_shape(a, b, operation)?;
    let a_guard = a.read_data();
    let b_guard = b.read_data();
    let data = a_guard
        .data
        .iter()
        .zip(b_guard.data.iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Ok(Tensor::from_raw(data, a_guard.shape.clone()))
}

/// Applies `f` element-wise to one tensor. Records nothing.
pub(crate) fn map(a: &Tensor, f: impl Fn(f32) -> f32) -> Tensor {
    let guard = a.read_data();
    let data = guard.data.iter().map(|&x| f(x)).collect();
    Tensor::from_raw(data, guard.shape.clone())
}
