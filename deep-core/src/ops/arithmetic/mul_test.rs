use super::*;
use crate::autograd::check_grad;
use crate::tensor::Tensor;
use approx::assert_relative_eq;

#[test]
fn test_mul_forward() {
    let a = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let b = Tensor::new(vec![2.0, 0.5, -1.0, 0.0], vec![2, 2]).unwrap();
    let c = mul_op(&a, &b).unwrap();
    assert_eq!(c.to_vec(), vec![2.0, 1.0, -3.0, 0.0]);
}

#[test]
fn test_mul_backward() {
    let a = Tensor::new(vec![2.0, 3.0], vec![2]).unwrap();
    let b = Tensor::new(vec![5.0, 7.0], vec![2]).unwrap();
    a.set_requires_grad(true).unwrap();
    b.set_requires_grad(true).unwrap();
    let c = mul_op(&a, &b).unwrap();
    assert_eq!(c.grad_fn().unwrap().name(), "MulBackward");

    let upstream = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    c.backward(Some(&upstream)).unwrap();
    assert_eq!(a.grad().unwrap().to_vec(), vec![5.0, 14.0]);
    assert_eq!(b.grad().unwrap().to_vec(), vec![2.0, 6.0]);
}

#[test]
fn test_mul_scalar() {
    let a = Tensor::new(vec![1.0, -2.0, 4.0], vec![3]).unwrap();
    a.set_requires_grad(true).unwrap();
    let c = mul_scalar_op(&a, 0.5).unwrap();
    assert_eq!(c.to_vec(), vec![0.5, -1.0, 2.0]);
    assert_eq!(c.grad_fn().unwrap().inputs().len(), 1);

    let upstream = Tensor::new(vec![1.0, 1.0, 2.0], vec![3]).unwrap();
    c.backward(Some(&upstream)).unwrap();
    let grad = a.grad().unwrap().to_vec();
    assert_relative_eq!(grad[0], 0.5);
    assert_relative_eq!(grad[2], 1.0);
}

#[test]
fn test_mul_grad_check() {
    let a = Tensor::new(vec![0.7, -1.3, 2.1, 0.2], vec![4]).unwrap();
    let b = Tensor::new(vec![1.5, 0.9, -0.4, 2.2], vec![4]).unwrap();
    a.set_requires_grad(true).unwrap();
    b.set_requires_grad(true).unwrap();
    let output_grad = Tensor::new(vec![1.0, -1.0, 0.5, 2.0], vec![4]).unwrap();
    check_grad(|t| mul_op(&t[0], &t[1]), &[a, b], &output_grad, 1e-2, 1e-2).unwrap();
}
