//! A minimal feed-forward neural network engine.
//!
//! Given labelled fixed-length feature vectors, a [`Network`](neural_network::Network)
//! learns a multi-layer classifier with online gradient descent on softmax cross-entropy
//! and reports loss and accuracy.

/// Error types returned by every fallible operation of the crate
pub mod error;

pub use error::{IoError, ModelError};

/// The numeric engine: units, layers and the network that chains them.
///
/// # Core Components
///
/// - **Unit**: one node holding a weight vector, a bias and an activation; caches its last
///   input, output and gradient, and updates its own parameters
/// - **Layer**: an ordered set of units sharing input width and activation
/// - **Network**: an ordered sequence of layers; forward pass ending in softmax,
///   cross-entropy loss, backpropagation, training and evaluation
/// - **WeightInitializer**: the seedable random source owned by each network
/// - **NetworkConfig**: a builder for the layer widths and hyper-parameters
///
/// Hidden layers use ReLU; the output layer is linear and its outputs are the softmax
/// logits. Training is strictly sequential, one sample at a time, in dataset order.
///
/// # Examples
/// ```rust
/// use rustynet::neural_network::*;
/// use ndarray::array;
///
/// let mut network = Network::with_seed(&[3, 5, 2], 0.01, 1).unwrap();
///
/// let x = array![0.2, -0.4, 1.0];
/// let probabilities = network.forward(x.view()).unwrap();
/// assert!((probabilities.sum() - 1.0).abs() < 1e-9);
///
/// let loss_before = network.compute_loss(probabilities.view(), 1).unwrap();
/// network.backpropagate(x.view(), 1).unwrap();
/// let probabilities = network.forward(x.view()).unwrap();
/// let loss_after = network.compute_loss(probabilities.view(), 1).unwrap();
/// assert!(loss_after < loss_before);
/// ```
pub mod neural_network;

/// Dataset access for training and evaluation.
///
/// The [`Dataset`](dataset::Dataset) trait is the interface the network reads samples
/// through; [`InMemoryDataset`](dataset::InMemoryDataset) is an owned implementation and
/// [`load_csv`](dataset::load_csv) reads `label,f1,...,fn` text files into one.
///
/// # Example
/// ```rust
/// use rustynet::dataset::{CsvOptions, Dataset, parse_csv_str};
///
/// let dataset = parse_csv_str("0,0,255\n1,255,0\n", &CsvOptions::default()).unwrap();
/// assert_eq!(dataset.n_samples(), 2);
/// assert_eq!(dataset.features(0).unwrap()[1], 1.0);
/// ```
pub mod dataset;

/// Convenience re-exports of the most used types
pub mod prelude;
