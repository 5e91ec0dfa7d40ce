/// This module provides loading of labelled samples from comma-separated text
pub mod csv;
/// This module provides an owned, in-memory dataset
pub mod in_memory;

pub use csv::*;
pub use in_memory::*;

use crate::ModelError;
use ndarray::ArrayView1;

/// Source of labelled samples consumed by [`Network::train`](crate::neural_network::Network::train)
/// and [`Network::test`](crate::neural_network::Network::test).
///
/// Every feature vector is expected to have the same length, equal to the network's input
/// width; the network reports `ShapeMismatch` otherwise.
pub trait Dataset {
    /// Number of samples
    fn n_samples(&self) -> usize;

    /// Class label of sample `index`
    ///
    /// # Returns
    ///
    /// - `Ok(usize)` - The label
    /// - `Err(ModelError::InputValidationError)` - If `index >= n_samples()`
    fn label(&self, index: usize) -> Result<usize, ModelError>;

    /// Feature vector of sample `index`
    ///
    /// # Returns
    ///
    /// - `Ok(ArrayView1<f64>)` - The features
    /// - `Err(ModelError::InputValidationError)` - If `index >= n_samples()`
    fn features(&self, index: usize) -> Result<ArrayView1<'_, f64>, ModelError>;

    fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }
}
