use crate::error::DeepError;
use crate::tensor::Tensor;

/// Stacks same-shaped tensors along a new leading dimension.
///
/// Used to collate samples into batches; the result is a fresh leaf.
///
/// # Errors
/// * `EmptyTensorList` if `tensors` is empty.
/// * `ShapeMismatch` if any tensor's shape differs from the first one's.
/// * `UnsupportedOperation` if any input requires gradients.
pub fn stack_op(tensors: &[Tensor]) -> Result<Tensor, DeepError> {
    let first = tensors.first().ok_or(DeepError::EmptyTensorList)?;
    let item_shape = first.shape();
    let item_len: usize = item_shape.iter().product();

    let mut data = Vec::with_capacity(tensors.len() * item_len);
    for t in tensors {
        let guard = t.read_data();
        if guard.shape != item_shape {
            return Err(DeepError::ShapeMismatch {
                expected: item_shape,
                actual: guard.shape.clone(),
                operation: "stack".to_string(),
            });
        }
        if guard.requires_grad {
            return Err(DeepError::UnsupportedOperation(
                "stack does not propagate gradients".to_string(),
            ));
        }
        data.extend_from_slice(&guard.data);
    }

    let mut shape = vec![tensors.len()];
    shape.extend(item_shape);
    Ok(Tensor::from_raw(data, shape))
}
