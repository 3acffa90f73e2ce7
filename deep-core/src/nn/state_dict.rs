//! Saving and restoring module parameters as JSON.
//!
//! The document is an object keyed by parameter name, each entry holding the tensor's
//! `shape` and its row-major `data`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DeepError;
use crate::nn::Module;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorRecord {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

pub type StateDict = BTreeMap<String, TensorRecord>;

/// Snapshot of every named parameter of `module`.
pub fn state_dict<M: Module + ?Sized>(module: &M) -> StateDict {
    module
        .named_parameters()
        .into_iter()
        .map(|(name, param)| {
            let record = TensorRecord {
                shape: param.shape(),
                data: param.to_vec(),
            };
            (name, record)
        })
        .collect()
}

/// Copies values from `state` into the parameters of `module`.
///
/// Entries of `state` that the module does not have are ignored.
///
/// # Errors
/// * `MissingStateKey` if a parameter of the module has no entry.
/// * `ShapeMismatch` if an entry's shape differs from the parameter's.
pub fn load_from_state_dict<M: Module + ?Sized>(module: &M, state: &StateDict) -> Result<(), DeepError> {
    for (name, param) in module.named_parameters() {
        let record = state
            .get(&name)
            .ok_or_else(|| DeepError::MissingStateKey(name.clone()))?;
        let shape = param.shape();
        if record.shape != shape || record.data.len() != param.numel() {
            return Err(DeepError::ShapeMismatch {
                expected: shape,
                actual: record.shape.clone(),
                operation: format!("load_state_dict ({})", name),
            });
        }
        param.assign_data(record.data.clone())?;
    }
    Ok(())
}

/// Writes the state dict of `module` to `path` as JSON.
///
/// JSON has no NaN or infinity, so a module holding such a value is rejected before
/// the file is created.
///
/// # Errors
/// * `NonFiniteParameter` for the first non-finite element found.
/// * `Io` / `Serialization` if the file cannot be written.
pub fn save_state_dict<M: Module + ?Sized>(module: &M, path: &Path) -> Result<(), DeepError> {
    let state = state_dict(module);
    for (name, record) in &state {
        if let Some(index) = record.data.iter().position(|v| !v.is_finite()) {
            return Err(DeepError::NonFiniteParameter {
                name: name.clone(),
                index,
            });
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &state)?;
    writer.flush()?;
    log::debug!("saved {} tensors to {}", state.len(), path.display());
    Ok(())
}

/// Reads a JSON state dict from `path` into the parameters of `module`.
pub fn load_state_dict<M: Module + ?Sized>(module: &M, path: &Path) -> Result<(), DeepError> {
    let reader = BufReader::new(File::open(path)?);
    let state: StateDict = serde_json::from_reader(reader)?;
    load_from_state_dict(module, &state)?;
    log::debug!("loaded {} tensors from {}", state.len(), path.display());
    Ok(())
}

#[cfg(test)]
#[path = "state_dict_test.rs"]
mod tests;
