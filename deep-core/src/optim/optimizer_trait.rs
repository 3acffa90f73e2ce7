use crate::error::DeepError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating model parameters based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step using the gradients accumulated so far.
    fn step(&mut self) -> Result<(), DeepError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    fn zero_grad(&mut self);
}
