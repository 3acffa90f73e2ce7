//! Tensor, autograd and neural-network building blocks.
//!
//! A [`Tensor`] is a shared handle to a row-major `f32` buffer plus autograd metadata.
//! Operations in [`ops`] record [`autograd::BackwardOp`] nodes, [`nn`] builds layers and
//! losses on top of them, and [`optim`] updates parameters from accumulated gradients.

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;

pub use error::DeepError;
pub use tensor::Tensor;
