//! Optimizers for training neural networks.
//!
//! The [`Optimizer`] trait is the interface the training loop drives; [`SgdOptimizer`]
//! implements stochastic gradient descent with optional momentum and weight decay.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;
