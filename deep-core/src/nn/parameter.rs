use std::fmt;
use std::ops::Deref;

use crate::tensor::Tensor;

/// A tensor registered as a learnable parameter of a module.
///
/// Creating a `Parameter` turns on `requires_grad` for the wrapped tensor. Clones share
/// the underlying storage, so an optimizer holding a clone updates the module's weights.
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    pub fn new(tensor: Tensor, name: impl Into<String>) -> Self {
        Self::with_name(tensor, Some(name.into()))
    }

    pub fn new_unnamed(tensor: Tensor) -> Self {
        Self::with_name(tensor, None)
    }

    fn with_name(tensor: Tensor, name: Option<String>) -> Self {
        tensor.write_data().requires_grad = true;
        Parameter { tensor, name }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter({}: {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
