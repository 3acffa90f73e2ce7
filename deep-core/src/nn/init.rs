//! In-place parameter initialisation.

use rand::Rng;

use crate::error::DeepError;
use crate::tensor::{rand_uniform, Tensor};

/// Overwrites `tensor` with values drawn uniformly from `[low, high)`.
pub fn uniform_<R: Rng + ?Sized>(
    tensor: &Tensor,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<(), DeepError> {
    let sample = rand_uniform(&tensor.shape(), low, high, rng)?;
    tensor.assign_data(sample.to_vec())
}

/// Fills `tensor` with zeros.
pub fn zeros_(tensor: &Tensor) -> Result<(), DeepError> {
    tensor.assign_data(vec![0.0; tensor.numel()])
}

/// Bound `1/sqrt(fan_in)` of the uniform initialisation used by linear layers.
pub fn fan_in_bound(fan_in: usize) -> Result<f32, DeepError> {
    if fan_in == 0 {
        return Err(DeepError::InvalidHyperparameter {
            name: "fan_in".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(1.0 / (fan_in as f32).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_in_place() {
        let t = Tensor::new(vec![0.0; 50], vec![5, 10]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        uniform_(&t, -0.1, 0.1, &mut rng).unwrap();
        assert_eq!(t.shape(), vec![5, 10]);
        assert!(t.to_vec().iter().all(|v| (-0.1..0.1).contains(v)));
        zeros_(&t).unwrap();
        assert!(t.to_vec().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fan_in_bound() {
        assert_eq!(fan_in_bound(4).unwrap(), 0.5);
        assert!(fan_in_bound(0).is_err());
    }
}
