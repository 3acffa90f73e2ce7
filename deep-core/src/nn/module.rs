use crate::error::DeepError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules (layers and models built from them).
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    ///
    /// # Returns
    /// The output `Tensor`, or a `DeepError` if the input has the wrong shape.
    fn forward(&self, input: &Tensor) -> Result<Tensor, DeepError>;

    /// All learnable parameters of the module, including those of sub-modules.
    fn parameters(&self) -> Vec<&Parameter>;

    /// All learnable parameters with their hierarchical names
    /// (e.g. `"fc1.weight"`, `"fc1.bias"`). Names are unique within the module.
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Direct child modules with the field names they are stored under.
    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        Vec::new()
    }

    /// Clears the accumulated gradient of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.clear_grad();
        }
    }
}

/// Prefixes every name in `params` with `prefix.`. Used by containers to build
/// hierarchical parameter names from their children.
pub fn prefixed<'a>(prefix: &str, params: Vec<(String, &'a Parameter)>) -> Vec<(String, &'a Parameter)> {
    params
        .into_iter()
        .map(|(name, p)| (format!("{}.{}", prefix, name), p))
        .collect()
}
