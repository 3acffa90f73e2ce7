use super::*;
use crate::tensor::Tensor;

#[test]
fn test_parameter_requires_grad() {
    let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    assert!(!t.requires_grad());
    let p = Parameter::new(t.clone(), "weight");
    assert!(p.requires_grad());
    assert!(t.requires_grad());
    assert_eq!(p.name(), Some("weight"));
}

#[test]
fn test_parameter_clone_shares_data() {
    let p = Parameter::new_unnamed(Tensor::new(vec![1.0], vec![1]).unwrap());
    let q = p.clone();
    q.assign_data(vec![5.0]).unwrap();
    assert_eq!(p.to_vec(), vec![5.0]);
    assert!(p.tensor().ptr_eq(q.tensor()));
    assert!(p.name().is_none());
}

#[test]
fn test_parameter_debug_includes_name() {
    let p = Parameter::new(Tensor::new(vec![0.0], vec![1]).unwrap(), "bias");
    assert!(format!("{:?}", p).starts_with("Parameter(bias:"));
}
