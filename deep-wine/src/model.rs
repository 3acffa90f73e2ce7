use deep_core::nn::module::prefixed;
use deep_core::nn::{Linear, Module, Parameter, ReLU};
use deep_core::{DeepError, Tensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::FEATURE_COUNT;

const HIDDEN_1: usize = 64;
const HIDDEN_2: usize = 32;

/// Fully-connected regressor: `11 -> 64 -> ReLU -> 32 -> ReLU -> 1`.
///
/// Maps a `[batch, 11]` feature tensor to a `[batch, 1]` quality prediction.
#[derive(Debug)]
pub struct WineRegressor {
    fc1: Linear,
    fc2: Linear,
    fc3: Linear,
    relu: ReLU,
}

impl WineRegressor {
    /// A regressor initialised from the thread-local RNG.
    pub fn new() -> Result<Self, DeepError> {
        Self::from_rng(&mut rand::thread_rng())
    }

    /// A regressor whose initial weights depend only on `seed`.
    pub fn with_seed(seed: u64) -> Result<Self, DeepError> {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, DeepError> {
        Ok(WineRegressor {
            fc1: Linear::with_rng(FEATURE_COUNT, HIDDEN_1, true, rng)?,
            fc2: Linear::with_rng(HIDDEN_1, HIDDEN_2, true, rng)?,
            fc3: Linear::with_rng(HIDDEN_2, 1, true, rng)?,
            relu: ReLU::new(),
        })
    }

    pub fn fc1(&self) -> &Linear {
        &self.fc1
    }

    pub fn fc2(&self) -> &Linear {
        &self.fc2
    }

    pub fn fc3(&self) -> &Linear {
        &self.fc3
    }
}

impl Module for WineRegressor {
    fn forward(&self, input: &Tensor) -> Result<Tensor, DeepError> {
        let x = self.relu.forward(&self.fc1.forward(input)?)?;
        let x = self.relu.forward(&self.fc2.forward(&x)?)?;
        self.fc3.forward(&x)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = self.fc1.parameters();
        params.extend(self.fc2.parameters());
        params.extend(self.fc3.parameters());
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = prefixed("fc1", self.fc1.named_parameters());
        params.extend(prefixed("fc2", self.fc2.named_parameters()));
        params.extend(prefixed("fc3", self.fc3.named_parameters()));
        params
    }

    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        vec![
            ("fc1".to_string(), &self.fc1 as &dyn Module),
            ("fc2".to_string(), &self.fc2 as &dyn Module),
            ("fc3".to_string(), &self.fc3 as &dyn Module),
        ]
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
