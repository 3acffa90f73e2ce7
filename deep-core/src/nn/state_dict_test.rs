use super::*;
use crate::nn::module::prefixed;
use crate::nn::{Linear, Parameter};
use crate::tensor::Tensor;

#[derive(Debug)]
struct TwoLayers {
    first: Linear,
    second: Linear,
}

impl TwoLayers {
    fn new() -> Self {
        TwoLayers {
            first: Linear::new(3, 2, true).unwrap(),
            second: Linear::new(2, 1, true).unwrap(),
        }
    }
}

impl Module for TwoLayers {
    fn forward(&self, input: &Tensor) -> Result<Tensor, DeepError> {
        self.second.forward(&self.first.forward(input)?)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = self.first.parameters();
        params.extend(self.second.parameters());
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = prefixed("first", self.first.named_parameters());
        params.extend(prefixed("second", self.second.named_parameters()));
        params
    }
}

#[test]
fn test_state_dict_keys_and_shapes() {
    let model = TwoLayers::new();
    let state = state_dict(&model);
    let keys: Vec<&str> = state.keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        vec!["first.bias", "first.weight", "second.bias", "second.weight"]
    );
    assert_eq!(state["first.weight"].shape, vec![2, 3]);
    assert_eq!(state["second.bias"].data.len(), 1);
}

#[test]
fn test_save_and_load_restores_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let trained = TwoLayers::new();
    save_state_dict(&trained, &path).unwrap();

    let fresh = TwoLayers::new();
    load_state_dict(&fresh, &path).unwrap();
    assert_eq!(state_dict(&fresh), state_dict(&trained));

    let x = Tensor::new(vec![0.1, 0.2, 0.3], vec![1, 3]).unwrap();
    assert_eq!(
        fresh.forward(&x).unwrap().to_vec(),
        trained.forward(&x).unwrap().to_vec()
    );
}

#[test]
fn test_save_rejects_non_finite_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let model = TwoLayers::new();
    let mut weights = model.first.weight().to_vec();
    weights[4] = f32::NAN;
    model.first.weight().assign_data(weights).unwrap();

    match save_state_dict(&model, &path) {
        Err(DeepError::NonFiniteParameter { name, index }) => {
            assert_eq!(name, "first.weight");
            assert_eq!(index, 4);
        }
        other => panic!("expected NonFiniteParameter, got {:?}", other),
    }
    assert!(!path.exists());

    let mut bias = model.second.bias().unwrap().to_vec();
    bias[0] = f32::INFINITY;
    model.second.bias().unwrap().assign_data(bias).unwrap();
    let mut weights = model.first.weight().to_vec();
    weights[4] = 0.5;
    model.first.weight().assign_data(weights).unwrap();
    assert!(matches!(
        save_state_dict(&model, &path),
        Err(DeepError::NonFiniteParameter { index: 0, .. })
    ));
}

#[test]
fn test_saved_finite_values_always_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let model = TwoLayers::new();
    model
        .second
        .weight()
        .assign_data(vec![f32::MAX, f32::MIN_POSITIVE])
        .unwrap();
    save_state_dict(&model, &path).unwrap();

    let fresh = TwoLayers::new();
    load_state_dict(&fresh, &path).unwrap();
    assert_eq!(
        fresh.second.weight().to_vec(),
        vec![f32::MAX, f32::MIN_POSITIVE]
    );
}

#[test]
fn test_load_missing_key() {
    let model = TwoLayers::new();
    let mut state = state_dict(&model);
    state.remove("second.weight");
    match load_from_state_dict(&model, &state) {
        Err(DeepError::MissingStateKey(name)) => assert_eq!(name, "second.weight"),
        other => panic!("expected MissingStateKey, got {:?}", other),
    }
}

#[test]
fn test_load_shape_mismatch() {
    let model = TwoLayers::new();
    let mut state = state_dict(&model);
    state.insert(
        "first.bias".to_string(),
        TensorRecord {
            shape: vec![3],
            data: vec![0.0; 3],
        },
    );
    assert!(matches!(
        load_from_state_dict(&model, &state),
        Err(DeepError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let model = TwoLayers::new();
    assert!(matches!(
        load_state_dict(&model, &dir.path().join("absent.json")),
        Err(DeepError::Io(_))
    ));
}
