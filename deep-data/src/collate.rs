use deep_core::ops::stack::stack_op;
use deep_core::{DeepError, Tensor};

/// Turns a batch of multi-tensor items into one tensor per field.
///
/// Every item must have the same number of tensors; field `i` of the result stacks
/// field `i` of every item along a new leading dimension.
///
/// # Errors
/// * `EmptyTensorList` for an empty batch.
/// * `ShapeMismatch` if items disagree on their number of fields or on a field's shape.
pub fn collate_tensors(batch: Vec<Vec<Tensor>>) -> Result<Vec<Tensor>, DeepError> {
    let fields = batch.first().ok_or(DeepError::EmptyTensorList)?.len();
    let mut columns: Vec<Vec<Tensor>> = (0..fields)
        .map(|_| Vec::with_capacity(batch.len()))
        .collect();
    for item in batch {
        if item.len() != fields {
            return Err(DeepError::ShapeMismatch {
                expected: vec![fields],
                actual: vec![item.len()],
                operation: "collate_tensors (fields per item)".to_string(),
            });
        }
        for (column, tensor) in columns.iter_mut().zip(item) {
            column.push(tensor);
        }
    }
    columns.iter().map(|column| stack_op(column)).collect()
}
