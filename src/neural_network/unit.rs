use crate::ModelError;
use crate::neural_network::{Activation, WeightInitializer};
use ndarray::{Array1, ArrayView1};

/// A single computational node: weight vector, bias and activation.
///
/// The unit caches what it needs for the gradient step:
///
/// - `input_cache` - the input of the most recent forward pass
/// - `output` - the activated output of the most recent forward pass
/// - `gradient` - δ, the derivative of the loss with respect to the pre-activation sum,
///   set by the owning layer during backpropagation
///
/// The weight vector length is fixed at construction (only [`Unit::push_weight`] grows it,
/// and it clears the caches when it does).
///
/// # Example
/// ```rust
/// use rustynet::neural_network::{Activation, Unit};
/// use ndarray::array;
///
/// let mut unit = Unit::from_parameters(array![0.5, -1.0], 0.25, Activation::ReLU).unwrap();
/// let out = unit.forward(array![2.0, 0.5].view()).unwrap();
/// assert_eq!(out, 0.75);
///
/// unit.set_gradient(1.0);
/// unit.update_weights(0.1).unwrap();
/// assert_eq!(unit.weights(), &array![0.3, -1.05]);
/// ```
#[derive(Debug, Clone)]
pub struct Unit {
    weights: Array1<f64>,
    bias: f64,
    activation: Activation,
    input_cache: Option<Array1<f64>>,
    output: Option<f64>,
    gradient: Option<f64>,
}

impl Unit {
    /// Creates a unit with weights and bias drawn from the initializer
    ///
    /// # Parameters
    ///
    /// - `input_width` - Number of inputs, i.e. the length of the weight vector
    /// - `activation` - Activation applied to the weighted sum
    /// - `initializer` - Random source for the initial weights and bias
    pub fn new(
        input_width: usize,
        activation: Activation,
        initializer: &mut WeightInitializer,
    ) -> Self {
        let weights = initializer.draw_vector(input_width);
        let bias = initializer.draw();
        Self::from_parts(weights, bias, activation)
    }

    /// Creates a unit with explicit parameters
    ///
    /// # Returns
    ///
    /// - `Ok(Unit)` - The unit
    /// - `Err(ModelError::InputValidationError)` - If any weight or the bias is not finite
    pub fn from_parameters(
        weights: Array1<f64>,
        bias: f64,
        activation: Activation,
    ) -> Result<Self, ModelError> {
        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::InputValidationError(
                "Unit parameters must be finite".to_string(),
            ));
        }
        Ok(Self::from_parts(weights, bias, activation))
    }

    fn from_parts(weights: Array1<f64>, bias: f64, activation: Activation) -> Self {
        Self {
            weights,
            bias,
            activation,
            input_cache: None,
            output: None,
            gradient: None,
        }
    }

    /// Computes `activation(bias + Σ weight_i × input_i)` and caches input and output
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The activated output
    /// - `Err(ModelError::ShapeMismatch)` - If `input.len()` differs from the unit's input width
    pub fn forward(&mut self, input: ArrayView1<f64>) -> Result<f64, ModelError> {
        if input.len() != self.weights.len() {
            return Err(ModelError::shape_mismatch(
                "Unit",
                self.weights.len(),
                input.len(),
            ));
        }

        let z = self.bias + self.weights.dot(&input);
        let a = self.activation.apply(z);

        self.input_cache = Some(input.to_owned());
        self.output = Some(a);
        Ok(a)
    }

    /// Stores δ for the next weight update
    pub fn set_gradient(&mut self, gradient: f64) {
        self.gradient = Some(gradient);
    }

    /// Gradient-descent step: `w_i -= lr × δ × input_i`, `bias -= lr × δ`
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Parameters updated
    /// - `Err(ModelError::ProcessingError)` - If no forward pass or no gradient is cached
    pub fn update_weights(&mut self, learning_rate: f64) -> Result<(), ModelError> {
        let input = match &self.input_cache {
            Some(input) => input,
            None => Err(ModelError::ProcessingError(String::from(
                "Forward pass has not been run",
            )))?,
        };
        let gradient = match self.gradient {
            Some(g) => g,
            None => Err(ModelError::ProcessingError(String::from(
                "Gradient has not been computed",
            )))?,
        };

        let step = learning_rate * gradient;
        self.weights.scaled_add(-step, input);
        self.bias -= step;
        Ok(())
    }

    /// Appends one input weight, widening the unit by one input.
    ///
    /// Cached forward/backward state no longer matches the new width and is cleared.
    pub fn push_weight(&mut self, weight: f64) {
        let mut weights = self.weights.to_vec();
        weights.push(weight);
        self.weights = Array1::from_vec(weights);
        self.clear_cache();
    }

    pub(crate) fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
        self.clear_cache();
    }

    fn clear_cache(&mut self) {
        self.input_cache = None;
        self.output = None;
        self.gradient = None;
    }

    /// Weight vector, one entry per input
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Number of inputs the unit expects
    pub fn input_width(&self) -> usize {
        self.weights.len()
    }

    /// Activated output of the most recent forward pass
    pub fn output(&self) -> Option<f64> {
        self.output
    }

    /// δ assigned by the most recent backward pass
    pub fn gradient(&self) -> Option<f64> {
        self.gradient
    }

    /// Input of the most recent forward pass
    pub fn last_input(&self) -> Option<&Array1<f64>> {
        self.input_cache.as_ref()
    }
}
