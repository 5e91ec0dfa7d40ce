use crate::ModelError;
use crate::dataset::Dataset;
use ndarray::{Array2, ArrayView1, Axis};

/// Dataset held entirely in memory: one feature row and one label per sample
///
/// # Example
///
/// ```
/// use rustynet::dataset::{Dataset, InMemoryDataset};
/// use ndarray::array;
///
/// let dataset = InMemoryDataset::new(array![[0.0, 1.0], [1.0, 0.0]], vec![0, 1]).unwrap();
/// assert_eq!(dataset.n_samples(), 2);
/// assert_eq!(dataset.label(1).unwrap(), 1);
/// assert_eq!(dataset.features(0).unwrap(), array![0.0, 1.0].view());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryDataset {
    features: Array2<f64>,
    labels: Vec<usize>,
}

impl InMemoryDataset {
    /// Creates a dataset from a feature matrix of shape `(n_samples, n_features)` and the
    /// matching labels
    ///
    /// # Returns
    ///
    /// - `Ok(InMemoryDataset)` - The dataset
    /// - `Err(ModelError::InputValidationError)` - If the number of rows and labels differ
    pub fn new(features: Array2<f64>, labels: Vec<usize>) -> Result<Self, ModelError> {
        if features.nrows() != labels.len() {
            return Err(ModelError::InputValidationError(format!(
                "Sample count mismatch: features have {} rows, labels have {} entries",
                features.nrows(),
                labels.len()
            )));
        }
        Ok(Self { features, labels })
    }

    /// Length of every feature vector
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn feature_matrix(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    fn check_index(&self, index: usize) -> Result<(), ModelError> {
        if index >= self.labels.len() {
            return Err(ModelError::InputValidationError(format!(
                "Sample index {} is out of range for {} samples",
                index,
                self.labels.len()
            )));
        }
        Ok(())
    }
}

impl Dataset for InMemoryDataset {
    fn n_samples(&self) -> usize {
        self.labels.len()
    }

    fn label(&self, index: usize) -> Result<usize, ModelError> {
        self.check_index(index)?;
        Ok(self.labels[index])
    }

    fn features(&self, index: usize) -> Result<ArrayView1<'_, f64>, ModelError> {
        self.check_index(index)?;
        Ok(self.features.index_axis(Axis(0), index))
    }
}
