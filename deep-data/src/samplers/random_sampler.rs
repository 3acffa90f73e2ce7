use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::traits::Sampler;

/// A sampler that visits dataset indices in random order.
///
/// Without replacement every call to `iter` yields a fresh permutation. A seeded
/// sampler owns its RNG, so a sequence of epochs is reproducible; an unseeded one
/// draws from the thread-local RNG.
#[derive(Debug)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: Option<Mutex<StdRng>>,
}

impl RandomSampler {
    /// Creates a new `RandomSampler`.
    ///
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The total number of samples to draw. If `None`, it defaults to
    ///   the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            rng: None,
        }
    }

    /// A permutation sampler over the whole dataset, driven by a seeded RNG.
    pub fn with_seed(seed: u64) -> Self {
        RandomSampler {
            replacement: false,
            num_samples: None,
            rng: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn draw(&self, dataset_len: usize, num_samples: usize) -> Vec<usize> {
        match &self.rng {
            Some(rng) => {
                let mut guard = match rng.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => {
                        log::warn!("RandomSampler RNG mutex was poisoned. Recovering.");
                        poisoned.into_inner()
                    }
                };
                self.sample_indices(&mut *guard, dataset_len, num_samples)
            }
            None => self.sample_indices(&mut rand::thread_rng(), dataset_len, num_samples),
        }
    }

    fn sample_indices<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        dataset_len: usize,
        num_samples: usize,
    ) -> Vec<usize> {
        if self.replacement {
            (0..num_samples)
                .map(|_| rng.gen_range(0..dataset_len))
                .collect()
        } else {
            let mut indices: Vec<usize> = (0..dataset_len).collect();
            indices.shuffle(rng);
            indices.truncate(num_samples);
            indices
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        let num_samples = self.num_samples.unwrap_or(dataset_len);
        if !self.replacement && num_samples > dataset_len {
            log::warn!(
                "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement. Returning empty iterator.",
                num_samples,
                dataset_len
            );
            return Box::new(std::iter::empty());
        }
        Box::new(self.draw(dataset_len, num_samples).into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        self.num_samples.unwrap_or(dataset_len)
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
