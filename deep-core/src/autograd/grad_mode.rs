//! Thread-local switch for recording backward nodes.

use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// True unless a [`NoGradGuard`] is alive on this thread.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(Cell::get)
}

/// While alive, forward operations on this thread record no backward nodes and
/// their results do not require gradients. Dropping it restores the previous mode.
#[derive(Debug)]
pub struct NoGradGuard {
    prev: bool,
}

impl NoGradGuard {
    pub fn new() -> Self {
        let prev = GRAD_ENABLED.with(|g| g.replace(false));
        NoGradGuard { prev }
    }
}

impl Default for NoGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|g| g.set(self.prev));
    }
}

/// Runs `f` with graph recording disabled.
pub fn no_grad<T>(f: impl FnOnce() -> T) -> T {
    let _guard = NoGradGuard::new();
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Tensor;

    fn leaf(values: Vec<f32>) -> Tensor {
        let n = values.len();
        let t = Tensor::new(values, vec![n]).unwrap();
        t.set_requires_grad(true).unwrap();
        t
    }

    #[test]
    fn test_guard_nesting_restores_mode() {
        assert!(is_grad_enabled());
        {
            let _outer = NoGradGuard::new();
            assert!(!is_grad_enabled());
            {
                let _inner = NoGradGuard::new();
                assert!(!is_grad_enabled());
            }
            assert!(!is_grad_enabled());
        }
        assert!(is_grad_enabled());
    }

    #[test]
    fn test_no_grad_skips_recording() {
        let x = leaf(vec![1.0, -2.0]);
        let y = no_grad(|| x.mul(&x).unwrap().relu().unwrap().sum().unwrap());
        assert!(y.grad_fn().is_none());
        assert!(!y.requires_grad());
        assert_eq!(y.item().unwrap(), 1.0);

        let z = x.mul(&x).unwrap().sum().unwrap();
        assert!(z.grad_fn().is_some());
    }
}
