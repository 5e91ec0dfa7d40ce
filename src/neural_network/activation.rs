use ndarray::{Array1, ArrayView1};

/// Activation function applied by every unit of a layer
///
/// Hidden layers use `ReLU`; the output layer uses `Linear` so that its raw values are
/// valid softmax logits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    ReLU,
    Linear,
}

impl Activation {
    /// Applies the activation function to a pre-activation sum
    ///
    /// # Parameters
    ///
    /// * `z` - Weighted sum of the inputs plus bias
    ///
    /// # Returns
    ///
    /// * `f64` - `max(0, z)` for `ReLU`, `z` unchanged for `Linear`
    pub fn apply(&self, z: f64) -> f64 {
        match self {
            Activation::ReLU => {
                if z > 0.0 {
                    z
                } else {
                    0.0
                }
            }
            Activation::Linear => z,
        }
    }

    /// Computes the derivative of the activation given its *output*
    ///
    /// For ReLU the output is zero exactly when the pre-activation was not positive, so
    /// checking `a > 0` gives the same answer as checking the pre-activation sign.
    ///
    /// # Parameters
    ///
    /// * `a` - Value returned by [`Activation::apply`]
    ///
    /// # Returns
    ///
    /// * `f64` - `1.0` or `0.0` for `ReLU`, always `1.0` for `Linear`
    pub fn derivative_from_output(&self, a: f64) -> f64 {
        match self {
            Activation::ReLU => {
                if a > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Linear => 1.0,
        }
    }

    /// Short lowercase name used in summaries and logs
    pub fn name(&self) -> &'static str {
        match self {
            Activation::ReLU => "relu",
            Activation::Linear => "linear",
        }
    }
}

/// Turns raw logits into a probability distribution
///
/// The maximum logit is subtracted before exponentiating so large logits cannot overflow;
/// the shift cancels out in the normalisation.
///
/// # Parameters
///
/// * `logits` - Raw output values of the last layer
///
/// # Returns
///
/// * `Array1<f64>` - Non-negative values summing to 1 (an empty input yields an empty output)
pub fn softmax(logits: ArrayView1<f64>) -> Array1<f64> {
    if logits.is_empty() {
        return Array1::zeros(0);
    }

    let max_val = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut out = logits.mapv(|x| (x - max_val).exp());
    let sum = out.sum();
    out.mapv_inplace(|x| x / sum);
    out
}

/// Index of the largest value, the first one on ties
///
/// Returns `None` for an empty vector.
pub fn argmax(values: ArrayView1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, best_val)) if v <= best_val => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
