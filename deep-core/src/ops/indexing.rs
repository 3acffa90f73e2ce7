//! Row selection. These operations copy data and do not take part in autograd.

use crate::error::DeepError;
use crate::tensor::Tensor;

/// Returns row `index` of `input` along the first dimension, as a tensor of shape
/// `input.shape()[1..]`.
pub fn select_row(input: &Tensor, index: usize) -> Result<Tensor, DeepError> {
    let guard = input.read_data();
    let Some((&rows, inner)) = guard.shape.split_first() else {
        return Err(DeepError::RankMismatch {
            expected: 1,
            actual: 0,
        });
    };
    if index >= rows {
        return Err(DeepError::IndexOutOfBounds {
            index: vec![index],
            shape: guard.shape.clone(),
        });
    }
    let row_len: usize = inner.iter().product();
    let start = index * row_len;
    Ok(Tensor::from_raw(
        guard.data[start..start + row_len].to_vec(),
        inner.to_vec(),
    ))
}
