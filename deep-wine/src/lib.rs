//! Wine-quality regression on top of `deep-core`.
//!
//! [`dataset`] prepares normalised, stratified train/test CSV files, [`model`] defines
//! the 11-64-32-1 regressor, [`train`] and [`evaluate`] run it, and [`cli`] wires them
//! behind the `wine-regression` binary. [`graph_demo`] builds the small graphs shown by
//! `inspect-graph`.

pub mod cli;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod graph_demo;
pub mod model;
pub mod train;

pub use dataset::{csv_to_tensor, transform_dataset, DatasetLayout, DatasetPaths, Variant};
pub use error::WineError;
pub use evaluate::{evaluate, predict, test, EvalReport};
pub use model::WineRegressor;
pub use train::{train, train_on_tensors, TrainConfig, TrainReport};
