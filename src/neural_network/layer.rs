use crate::ModelError;
use crate::neural_network::{Activation, Unit, WeightInitializer};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// What a layer needs to assign δ to each of its units during backpropagation.
#[derive(Debug, Clone, Copy)]
pub enum GradientSignal<'a> {
    /// The layer is the output layer. `deltas[i]` is already the softmax cross-entropy
    /// error `p_i - 1{i == target}`; a linear unit's derivative is 1 so it is assigned as-is.
    Output {
        deltas: ArrayView1<'a, f64>,
        target: usize,
    },
    /// The layer is a hidden layer. `next_gradients[j]` is δ of unit `j` in the following
    /// layer and `next_weights[[j, i]]` is the weight that unit gives to this layer's unit `i`.
    Hidden {
        next_gradients: ArrayView1<'a, f64>,
        next_weights: ArrayView2<'a, f64>,
    },
}

/// Ordered collection of units sharing one input width and one activation.
///
/// Unit order is output order: unit `i` produces element `i` of [`Layer::forward`]'s result.
///
/// # Example
/// ```rust
/// use rustynet::neural_network::{Activation, Layer, Unit};
/// use ndarray::array;
///
/// let mut layer = Layer::from_units(vec![
///     Unit::from_parameters(array![1.0, 0.0], 0.0, Activation::ReLU).unwrap(),
///     Unit::from_parameters(array![0.0, -1.0], 0.0, Activation::ReLU).unwrap(),
/// ])
/// .unwrap();
///
/// let out = layer.forward(array![2.0, 3.0].view()).unwrap();
/// assert_eq!(out, array![2.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Layer {
    units: Vec<Unit>,
    input_width: usize,
    activation: Activation,
}

impl Layer {
    /// Creates a layer of `num_units` randomly initialised units
    ///
    /// # Parameters
    ///
    /// - `num_units` - Output width of the layer
    /// - `input_width` - Input width shared by every unit
    /// - `activation` - Activation shared by every unit
    /// - `initializer` - Random source for the unit parameters
    pub fn new(
        num_units: usize,
        input_width: usize,
        activation: Activation,
        initializer: &mut WeightInitializer,
    ) -> Self {
        let units = (0..num_units)
            .map(|_| Unit::new(input_width, activation, initializer))
            .collect();
        Self {
            units,
            input_width,
            activation,
        }
    }

    /// Creates a layer from existing units
    ///
    /// # Returns
    ///
    /// - `Ok(Layer)` - The layer
    /// - `Err(ModelError::InvalidTopology)` - If `units` is empty, or the units disagree on
    ///   input width or activation
    pub fn from_units(units: Vec<Unit>) -> Result<Self, ModelError> {
        let first = match units.first() {
            Some(u) => u,
            None => {
                return Err(ModelError::InvalidTopology(
                    "A layer needs at least one unit".to_string(),
                ));
            }
        };
        let input_width = first.input_width();
        let activation = first.activation();

        if let Some(i) = units
            .iter()
            .position(|u| u.input_width() != input_width || u.activation() != activation)
        {
            return Err(ModelError::InvalidTopology(format!(
                "Unit {} does not share the layer's input width ({}) and activation ({})",
                i,
                input_width,
                activation.name()
            )));
        }

        Ok(Self {
            units,
            input_width,
            activation,
        })
    }

    /// Appends a randomly initialised unit, growing the output width by one
    pub fn add_unit(&mut self, initializer: &mut WeightInitializer) {
        self.units
            .push(Unit::new(self.input_width, self.activation, initializer));
    }

    /// Outputs of every unit for the given input, in unit order
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - One value per unit
    /// - `Err(ModelError::ShapeMismatch)` - If `input.len()` differs from the layer's input width
    pub fn forward(&mut self, input: ArrayView1<f64>) -> Result<Array1<f64>, ModelError> {
        if input.len() != self.input_width {
            return Err(ModelError::shape_mismatch(
                "Layer",
                self.input_width,
                input.len(),
            ));
        }

        let mut outputs = Array1::zeros(self.units.len());
        for (out, unit) in outputs.iter_mut().zip(self.units.iter_mut()) {
            *out = unit.forward(input)?;
        }
        Ok(outputs)
    }

    /// Assigns δ to every unit
    ///
    /// For a hidden layer unit `i`:
    /// `δ_i = (Σ_j next_weights[[j, i]] × next_gradients[j]) × 1{output_i > 0}`
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Every unit holds a fresh gradient
    /// - `Err(ModelError::ShapeMismatch)` - If the signal's shapes do not fit this layer
    /// - `Err(ModelError::InvalidLabel)` - If the output target is not a unit index
    /// - `Err(ModelError::ProcessingError)` - If a hidden unit has no cached output
    pub fn compute_gradients(&mut self, signal: GradientSignal) -> Result<(), ModelError> {
        let n = self.units.len();

        match signal {
            GradientSignal::Output { deltas, target } => {
                if deltas.len() != n {
                    return Err(ModelError::shape_mismatch("Output gradients", n, deltas.len()));
                }
                if target >= n {
                    return Err(ModelError::InvalidLabel(format!(
                        "target {} is outside [0, {})",
                        target, n
                    )));
                }

                // linear output: da/dz = 1
                for (unit, &delta) in self.units.iter_mut().zip(deltas.iter()) {
                    unit.set_gradient(delta);
                }
            }
            GradientSignal::Hidden {
                next_gradients,
                next_weights,
            } => {
                let (rows, cols) = next_weights.dim();
                if rows != next_gradients.len() {
                    return Err(ModelError::shape_mismatch(
                        "Next layer weights (rows)",
                        next_gradients.len(),
                        rows,
                    ));
                }
                if cols != n {
                    return Err(ModelError::shape_mismatch(
                        "Next layer weights (columns)",
                        n,
                        cols,
                    ));
                }
                let outputs = self.outputs()?;

                // column i of next_weights holds every weight that reads unit i
                let grad_sums = next_weights.t().dot(&next_gradients);

                for ((unit, &grad_sum), &a) in self
                    .units
                    .iter_mut()
                    .zip(grad_sums.iter())
                    .zip(outputs.iter())
                {
                    unit.set_gradient(grad_sum * self.activation.derivative_from_output(a));
                }
            }
        }

        Ok(())
    }

    /// Gradient-descent step on every unit
    pub fn update_weights(&mut self, learning_rate: f64) -> Result<(), ModelError> {
        for unit in &mut self.units {
            unit.update_weights(learning_rate)?;
        }
        Ok(())
    }

    /// Weights of every unit stacked as rows: shape `(len, input_width)`
    pub fn weights_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.units.len(), self.input_width));
        for (mut row, unit) in matrix.rows_mut().into_iter().zip(self.units.iter()) {
            row.assign(unit.weights());
        }
        matrix
    }

    /// Bias of every unit
    pub fn biases(&self) -> Array1<f64> {
        self.units.iter().map(Unit::bias).collect()
    }

    /// Cached output of every unit
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - One value per unit
    /// - `Err(ModelError::ProcessingError)` - If the layer has not run a forward pass
    pub fn outputs(&self) -> Result<Array1<f64>, ModelError> {
        self.units
            .iter()
            .map(|u| {
                u.output().ok_or_else(|| {
                    ModelError::ProcessingError(String::from("Forward pass has not been run"))
                })
            })
            .collect()
    }

    /// δ of every unit
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - One value per unit
    /// - `Err(ModelError::ProcessingError)` - If gradients have not been computed
    pub fn gradients(&self) -> Result<Array1<f64>, ModelError> {
        self.units
            .iter()
            .map(|u| {
                u.gradient().ok_or_else(|| {
                    ModelError::ProcessingError(String::from("Gradient has not been computed"))
                })
            })
            .collect()
    }

    /// Widens every unit by one randomly initialised input weight
    pub(crate) fn grow_input(&mut self, initializer: &mut WeightInitializer) {
        for unit in &mut self.units {
            unit.push_weight(initializer.draw());
        }
        self.input_width += 1;
    }

    pub(crate) fn set_activation(&mut self, activation: Activation) {
        for unit in &mut self.units {
            unit.set_activation(activation);
        }
        self.activation = activation;
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    /// Output width (number of units)
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Number of trainable parameters: weights plus biases
    pub fn param_count(&self) -> usize {
        self.units.len() * (self.input_width + 1)
    }
}
