//! Small graphs whose backward structure is worth looking at.

use std::fmt;

use clap::ValueEnum;
use deep_core::nn::{Linear, Module, ReLU};
use deep_core::tensor::{full, randn};
use deep_core::{DeepError, Tensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Demo {
    /// `sum(Linear(4,6)(relu(Linear(3,4)(x))))` with `x: [5, 3]`.
    #[default]
    Network,
    /// `sum(relu(x . w) + x)`, where `x` feeds two operations.
    Branching,
}

impl Demo {
    /// Builds the demo graph and returns its scalar root.
    pub fn build(self) -> Result<Tensor, DeepError> {
        match self {
            Demo::Network => network_demo(),
            Demo::Branching => branching_demo(),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Demo::Network => f.write_str("network"),
            Demo::Branching => f.write_str("branching"),
        }
    }
}

/// Two linear layers around a ReLU, summed to a scalar.
pub fn network_demo() -> Result<Tensor, DeepError> {
    let x = randn(&[5, 3])?;
    x.set_requires_grad(true)?;
    let fc1 = Linear::new(3, 4, true)?;
    let fc2 = Linear::new(4, 6, true)?;
    let hidden = ReLU::new().forward(&fc1.forward(&x)?)?;
    fc2.forward(&hidden)?.sum()
}

/// `x` is used both by the matrix product and by the final addition.
pub fn branching_demo() -> Result<Tensor, DeepError> {
    let x = full(&[2, 3], 1.5)?;
    x.set_requires_grad(true)?;
    let w = full(&[3, 3], 0.5)?;
    w.set_requires_grad(true)?;
    x.matmul(&w)?.relu()?.add(&x)?.sum()
}
