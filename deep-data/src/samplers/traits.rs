use std::fmt::Debug;

/// Defines the order in which a `DataLoader` visits the indices of a dataset.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset of `dataset_len` items.
    ///
    /// Called once per epoch; randomised samplers produce a new order on each call.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Returns the total number of indices the iterator will yield.
    fn len(&self, dataset_len: usize) -> usize;
}
