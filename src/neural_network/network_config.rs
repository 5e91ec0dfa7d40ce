use crate::ModelError;
use crate::neural_network::initializer::{DEFAULT_INIT_HIGH, DEFAULT_INIT_LOW};
use crate::neural_network::{Network, WeightInitializer};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Default learning rate for online gradient descent
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Builder describing a network before it is constructed.
///
/// # Example
/// ```rust
/// use rustynet::neural_network::NetworkConfig;
///
/// let network = NetworkConfig::new(784)
///     .hidden_layer(128)
///     .hidden_layer(64)
///     .output_layer(10)
///     .learning_rate(0.01)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(network.layer_sizes(), vec![784, 128, 64, 10]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    layer_sizes: Vec<usize>,
    learning_rate: f64,
    seed: Option<u64>,
    init_range: (f64, f64),
}

impl NetworkConfig {
    /// Starts a configuration for feature vectors of length `input_width`
    pub fn new(input_width: usize) -> Self {
        Self {
            layer_sizes: vec![input_width],
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: None,
            init_range: (DEFAULT_INIT_LOW, DEFAULT_INIT_HIGH),
        }
    }

    /// Appends a ReLU hidden layer
    pub fn hidden_layer(mut self, width: usize) -> Self {
        self.layer_sizes.push(width);
        self
    }

    /// Appends the linear output layer; `width` is the number of classes.
    ///
    /// Whichever layer is appended last becomes the output layer, so this is the same
    /// operation as [`NetworkConfig::hidden_layer`] under a name that reads better at the
    /// end of a chain.
    pub fn output_layer(self, width: usize) -> Self {
        self.hidden_layer(width)
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Fixes the seed of the weight initializer
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Range the initial weights and biases are drawn from (default `[-1, 1]`)
    pub fn init_range(mut self, low: f64, high: f64) -> Self {
        self.init_range = (low, high);
        self
    }

    /// Input width followed by every layer width
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Constructs the network
    ///
    /// # Returns
    ///
    /// - `Ok(Network)` - The network
    /// - `Err(ModelError)` - Same conditions as [`Network::new`], plus an invalid init range
    pub fn build(&self) -> Result<Network, ModelError> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (low, high) = self.init_range;
        let initializer = WeightInitializer::new(rng, low, high)?;

        Network::with_initializer(&self.layer_sizes, self.learning_rate, initializer)
    }
}
