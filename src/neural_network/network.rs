use crate::ModelError;
use crate::dataset::Dataset;
use crate::neural_network::loss_function::{cross_entropy, softmax_cross_entropy_delta};
use crate::neural_network::{
    Activation, GradientSignal, Layer, WeightInitializer, argmax, softmax,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use ndarray::{Array1, ArrayView1};

/// Feed-forward classifier: an ordered sequence of dense layers ending in softmax.
///
/// Every layer but the last applies ReLU; the last is linear and its raw outputs are the
/// logits that [`Network::forward`] normalises with softmax. Training is online gradient
/// descent on softmax cross-entropy, one sample at a time.
///
/// # Fields
///
/// - `layers` - Layers in evaluation order
/// - `input_width` - Length of the feature vectors the network accepts
/// - `learning_rate` - Step size shared by all layers
/// - `initializer` - Random source for the initial parameters and for topology growth
/// - `trained` - Set by the first successful `backpropagate`; freezes the topology
/// - `progress_bar` - Whether `train` draws a progress bar
///
/// # Example
/// ```rust
/// use rustynet::prelude::*;
/// use ndarray::array;
///
/// let features = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
/// let dataset = InMemoryDataset::new(features, vec![0, 0, 1, 1]).unwrap();
///
/// let mut network = Network::with_seed(&[2, 4, 2], 0.1, 42).unwrap();
/// network.set_progress_bar(false);
///
/// let losses = network.train(&dataset, 20).unwrap();
/// assert_eq!(losses.len(), 20);
///
/// let accuracy = network.test(&dataset).unwrap();
/// assert!((0.0..=1.0).contains(&accuracy));
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    input_width: usize,
    learning_rate: f64,
    initializer: WeightInitializer,
    trained: bool,
    progress_bar: bool,
}

impl Network {
    /// Creates a network from a width list, seeding the initializer from the operating system
    ///
    /// # Parameters
    ///
    /// - `sizes` - Input width followed by the width of every layer; the last entry is the
    ///   number of classes
    /// - `learning_rate` - Positive step size
    ///
    /// # Returns
    ///
    /// - `Ok(Network)` - The network
    /// - `Err(ModelError::InvalidTopology)` - If fewer than two widths are given or one is zero
    /// - `Err(ModelError::InputValidationError)` - If the learning rate is not positive and finite
    pub fn new(sizes: &[usize], learning_rate: f64) -> Result<Self, ModelError> {
        Self::with_initializer(sizes, learning_rate, WeightInitializer::from_entropy())
    }

    /// Same as [`Network::new`] with a fixed seed, so the initial parameters are reproducible
    pub fn with_seed(sizes: &[usize], learning_rate: f64, seed: u64) -> Result<Self, ModelError> {
        Self::with_initializer(sizes, learning_rate, WeightInitializer::from_seed(seed))
    }

    /// Same as [`Network::new`] with a caller-supplied random source
    pub fn with_initializer(
        sizes: &[usize],
        learning_rate: f64,
        mut initializer: WeightInitializer,
    ) -> Result<Self, ModelError> {
        if sizes.len() < 2 {
            return Err(ModelError::InvalidTopology(format!(
                "At least two widths (input and output) are required, got {}",
                sizes.len()
            )));
        }
        if let Some(i) = sizes.iter().position(|&w| w == 0) {
            return Err(ModelError::InvalidTopology(format!(
                "Width at position {} is zero",
                i
            )));
        }
        validate_learning_rate(learning_rate)?;

        let n_layers = sizes.len() - 1;
        let layers = sizes
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let activation = if i + 1 < n_layers {
                    Activation::ReLU
                } else {
                    Activation::Linear
                };
                Layer::new(pair[1], pair[0], activation, &mut initializer)
            })
            .collect();

        debug!("Network built with architecture {:?}", sizes);

        Ok(Self {
            layers,
            input_width: sizes[0],
            learning_rate,
            initializer,
            trained: false,
            progress_bar: true,
        })
    }

    /// Creates a network from existing layers
    ///
    /// # Returns
    ///
    /// - `Ok(Network)` - The network
    /// - `Err(ModelError::InvalidTopology)` - If `layers` is empty, a layer is empty, adjacent
    ///   widths do not chain, or the last layer is not linear
    /// - `Err(ModelError::InputValidationError)` - If the learning rate is not positive and finite
    pub fn from_layers(
        layers: Vec<Layer>,
        learning_rate: f64,
        initializer: WeightInitializer,
    ) -> Result<Self, ModelError> {
        let last = match layers.last() {
            Some(layer) => layer,
            None => {
                return Err(ModelError::InvalidTopology(
                    "A network needs at least one layer".to_string(),
                ));
            }
        };
        if last.activation() != Activation::Linear {
            return Err(ModelError::InvalidTopology(
                "The output layer must be linear so its outputs are softmax logits".to_string(),
            ));
        }
        if let Some(i) = layers.iter().position(|l| l.is_empty()) {
            return Err(ModelError::InvalidTopology(format!("Layer {} has no units", i)));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[1].input_width() != pair[0].len() {
                return Err(ModelError::InvalidTopology(format!(
                    "Layer {} expects {} inputs but layer {} produces {}",
                    i + 1,
                    pair[1].input_width(),
                    i,
                    pair[0].len()
                )));
            }
        }
        validate_learning_rate(learning_rate)?;

        let input_width = layers[0].input_width();
        Ok(Self {
            layers,
            input_width,
            learning_rate,
            initializer,
            trained: false,
            progress_bar: true,
        })
    }

    /// Appends a linear output layer of `width` units.
    ///
    /// The former output layer becomes a ReLU hidden layer and the new layer reads its
    /// outputs, so the width chain always stays consistent.
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Network)` - For method chaining
    /// - `Err(ModelError::InvalidTopology)` - If `width` is zero or training has started
    pub fn add_layer(&mut self, width: usize) -> Result<&mut Self, ModelError> {
        self.ensure_mutable_topology()?;
        if width == 0 {
            return Err(ModelError::InvalidTopology(
                "Cannot add a layer with zero units".to_string(),
            ));
        }

        let input_width = self.output_width();
        if let Some(last) = self.layers.last_mut() {
            last.set_activation(Activation::ReLU);
        }
        self.layers.push(Layer::new(
            width,
            input_width,
            Activation::Linear,
            &mut self.initializer,
        ));

        debug!("Added layer, architecture is now {:?}", self.layer_sizes());
        Ok(self)
    }

    /// Appends a unit to layer `layer_index`.
    ///
    /// Every unit of the following layer receives one new randomly initialised weight for
    /// the added output; growing the last layer adds a class.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The layer grew by one unit
    /// - `Err(ModelError::InvalidTopology)` - If the index is out of range or training has started
    pub fn add_unit(&mut self, layer_index: usize) -> Result<(), ModelError> {
        self.ensure_mutable_topology()?;
        if layer_index >= self.layers.len() {
            return Err(ModelError::InvalidTopology(format!(
                "Layer index {} is out of range for {} layers",
                layer_index,
                self.layers.len()
            )));
        }

        self.layers[layer_index].add_unit(&mut self.initializer);
        if let Some(next) = self.layers.get_mut(layer_index + 1) {
            next.grow_input(&mut self.initializer);
        }

        debug!(
            "Added unit to layer {}, architecture is now {:?}",
            layer_index,
            self.layer_sizes()
        );
        Ok(())
    }

    /// Class probabilities for one sample
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - Softmax of the last layer's outputs; sums to 1
    /// - `Err(ModelError::ShapeMismatch)` - If `input.len()` differs from the input width
    pub fn forward(&mut self, input: ArrayView1<f64>) -> Result<Array1<f64>, ModelError> {
        let logits = self.logits(input)?;
        Ok(softmax(logits.view()))
    }

    /// Runs every layer in order and returns the last layer's raw outputs
    fn logits(&mut self, input: ArrayView1<f64>) -> Result<Array1<f64>, ModelError> {
        if input.len() != self.input_width {
            return Err(ModelError::shape_mismatch(
                "Network",
                self.input_width,
                input.len(),
            ));
        }

        let mut current = input.to_owned();
        for layer in &mut self.layers {
            current = layer.forward(current.view())?;
        }
        Ok(current)
    }

    /// Cross-entropy loss of a probability vector produced by [`Network::forward`]
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - `-ln(output[label] + 1e-10)`, never negative
    /// - `Err(ModelError::InvalidLabel)` - If `label >= output_width`
    /// - `Err(ModelError::ShapeMismatch)` - If `output.len()` differs from the output width
    pub fn compute_loss(&self, output: ArrayView1<f64>, label: usize) -> Result<f64, ModelError> {
        self.validate_label(label)?;
        if output.len() != self.output_width() {
            return Err(ModelError::shape_mismatch(
                "Loss",
                self.output_width(),
                output.len(),
            ));
        }
        cross_entropy(output, label)
    }

    /// One gradient-descent step on a single labelled sample
    ///
    /// Runs a forward pass, computes the output error `p - onehot(label)`, walks the layers
    /// from last to first assigning δ to every unit, then updates every layer.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - All parameters updated
    /// - `Err(ModelError::ShapeMismatch)` - If `input.len()` differs from the input width
    /// - `Err(ModelError::InvalidLabel)` - If `label >= output_width`
    ///
    /// Both checks happen before any unit state changes.
    pub fn backpropagate(&mut self, input: ArrayView1<f64>, label: usize) -> Result<(), ModelError> {
        if input.len() != self.input_width {
            return Err(ModelError::shape_mismatch(
                "Network",
                self.input_width,
                input.len(),
            ));
        }
        self.validate_label(label)?;

        let logits = self.logits(input)?;
        let probabilities = softmax(logits.view());
        let deltas = softmax_cross_entropy_delta(probabilities.view(), label)?;

        let last = self.layers.len() - 1;
        self.layers[last].compute_gradients(GradientSignal::Output {
            deltas: deltas.view(),
            target: label,
        })?;

        for l in (0..last).rev() {
            let next_weights = self.layers[l + 1].weights_matrix();
            let next_gradients = self.layers[l + 1].gradients()?;
            self.layers[l].compute_gradients(GradientSignal::Hidden {
                next_gradients: next_gradients.view(),
                next_weights: next_weights.view(),
            })?;
        }

        // every δ is assigned, so the update order no longer matters
        for layer in &mut self.layers {
            layer.update_weights(self.learning_rate)?;
        }

        self.trained = true;
        Ok(())
    }

    /// Trains on every sample of the dataset once, in dataset order
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - Mean loss over the epoch (each loss is measured before that sample's update)
    /// - `Err(ModelError)` - If the dataset is empty or a sample is rejected
    pub fn train_epoch<D: Dataset + ?Sized>(&mut self, dataset: &D) -> Result<f64, ModelError> {
        let n_samples = dataset.n_samples();
        if n_samples == 0 {
            return Err(ModelError::InputValidationError(
                "Dataset cannot be empty".to_string(),
            ));
        }

        let mut total_loss = 0.0;
        for i in 0..n_samples {
            let features = dataset.features(i)?;
            let label = dataset.label(i)?;

            let output = self.forward(features)?;
            total_loss += self.compute_loss(output.view(), label)?;
            self.backpropagate(features, label)?;
        }

        Ok(total_loss / n_samples as f64)
    }

    /// Trains for `epochs` passes over the dataset
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<f64>)` - Mean loss of each epoch
    /// - `Err(ModelError::InputValidationError)` - If `epochs` is zero or the dataset is empty
    /// - `Err(ModelError)` - Any error raised by a sample
    pub fn train<D: Dataset + ?Sized>(
        &mut self,
        dataset: &D,
        epochs: usize,
    ) -> Result<Vec<f64>, ModelError> {
        if epochs == 0 {
            return Err(ModelError::InputValidationError(
                "Number of epochs must be greater than 0".to_string(),
            ));
        }

        let progress_bar = if self.progress_bar {
            let bar = ProgressBar::new(epochs as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Loss: {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓░"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut losses = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            let loss = match self.train_epoch(dataset) {
                Ok(loss) => loss,
                Err(e) => {
                    progress_bar.abandon_with_message("Training failed");
                    return Err(e);
                }
            };
            info!("Epoch {}, Loss: {:.6}", epoch + 1, loss);

            progress_bar.set_message(format!("{:.6}", loss));
            progress_bar.inc(1);
            losses.push(loss);
        }

        progress_bar.finish_with_message("Training completed");
        info!(
            "Training completed: {} samples, {} epochs",
            dataset.n_samples(),
            epochs
        );

        Ok(losses)
    }

    /// Predicted class: index of the highest probability, the first one on ties
    pub fn predict(&mut self, input: ArrayView1<f64>) -> Result<usize, ModelError> {
        let output = self.forward(input)?;
        argmax(output.view()).ok_or_else(|| {
            ModelError::ProcessingError("Network produced an empty output".to_string())
        })
    }

    /// Fraction of samples whose predicted class equals the label
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - Accuracy in `[0, 1]`
    /// - `Err(ModelError::InputValidationError)` - If the dataset is empty
    /// - `Err(ModelError)` - Any error raised by a sample
    pub fn test<D: Dataset + ?Sized>(&mut self, dataset: &D) -> Result<f64, ModelError> {
        let n_samples = dataset.n_samples();
        if n_samples == 0 {
            return Err(ModelError::InputValidationError(
                "Dataset cannot be empty".to_string(),
            ));
        }

        let mut correct = 0usize;
        for i in 0..n_samples {
            let features = dataset.features(i)?;
            let label = dataset.label(i)?;
            if self.predict(features)? == label {
                correct += 1;
            }
        }

        let accuracy = correct as f64 / n_samples as f64;
        info!("Test Accuracy: {}", accuracy);
        Ok(accuracy)
    }

    /// Prints a summary of the network's structure
    ///
    /// Displays each layer's activation, output shape and parameter count in a table
    pub fn summary(&self) {
        let col1_width = 33;
        let col2_width = 24;
        let col3_width = 15;
        println!("Network: input width {}", self.input_width);
        println!(
            "┏{}┳{}┳{}┓",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        );
        println!(
            "┃ {:<31} ┃ {:<22} ┃ {:>13} ┃",
            "Layer (activation)", "Output Shape", "Param #"
        );
        println!(
            "┡{}╇{}╇{}┩",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        );
        for (i, layer) in self.layers.iter().enumerate() {
            println!(
                "│ {:<31} │ {:<22} │ {:>13} │",
                format!("Layer_{} ({})", i, layer.activation().name()),
                format!("({},)", layer.len()),
                layer.param_count()
            );
        }
        println!(
            "└{}┴{}┴{}┘",
            "─".repeat(col1_width),
            "─".repeat(col2_width),
            "─".repeat(col3_width)
        );
        let total_params = self.param_count();
        // f64 parameters, 8 bytes each
        println!(" Total params: {} ({} B)", total_params, total_params * 8);
        println!(" Learning rate: {}", self.learning_rate);
    }

    fn validate_label(&self, label: usize) -> Result<(), ModelError> {
        if label >= self.output_width() {
            return Err(ModelError::InvalidLabel(format!(
                "label {} is outside [0, {})",
                label,
                self.output_width()
            )));
        }
        Ok(())
    }

    fn ensure_mutable_topology(&self) -> Result<(), ModelError> {
        if self.trained {
            return Err(ModelError::InvalidTopology(
                "Topology cannot change once training has started".to_string(),
            ));
        }
        Ok(())
    }

    /// Enables or disables the progress bar drawn by [`Network::train`]
    pub fn set_progress_bar(&mut self, enabled: bool) -> &mut Self {
        self.progress_bar = enabled;
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    /// Number of classes, the width of the last layer
    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, Layer::len)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Input width followed by every layer's width, the same shape as the list given to
    /// [`Network::new`]
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_width)
            .chain(self.layers.iter().map(Layer::len))
            .collect()
    }

    /// Total number of weights and biases
    pub fn param_count(&self) -> usize {
        self.layers.iter().map(Layer::param_count).sum()
    }

    /// Whether at least one `backpropagate` call has succeeded
    pub fn is_trained(&self) -> bool {
        self.trained
    }
}

fn validate_learning_rate(learning_rate: f64) -> Result<(), ModelError> {
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(ModelError::InputValidationError(format!(
            "Learning rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}
