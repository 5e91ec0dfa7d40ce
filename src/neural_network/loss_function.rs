use crate::ModelError;
use ndarray::{Array1, ArrayView1};

/// Added to the predicted probability so a value that underflowed to zero still has a
/// finite logarithm
pub const LOSS_EPSILON: f64 = 1e-10;

/// Cross-entropy of a probability vector against an integer class label
///
/// Computes `-ln(probabilities[label] + 1e-10)`, clamped at zero.
///
/// # Parameters
///
/// - `probabilities` - Softmax output of the network
/// - `label` - Index of the true class
///
/// # Returns
///
/// - `Ok(f64)` - The non-negative loss
/// - `Err(ModelError::InvalidLabel)` - If `label >= probabilities.len()`
pub fn cross_entropy(probabilities: ArrayView1<f64>, label: usize) -> Result<f64, ModelError> {
    let n_classes = probabilities.len();
    match probabilities.get(label) {
        Some(&p) => Ok((-(p + LOSS_EPSILON).ln()).max(0.0)),
        None => Err(ModelError::InvalidLabel(format!(
            "label {} is outside [0, {})",
            label, n_classes
        ))),
    }
}

/// Gradient of softmax followed by cross-entropy with respect to the logits
///
/// The closed form is `p_i - 1{i == label}`.
///
/// # Returns
///
/// - `Ok(Array1<f64>)` - One error value per output unit
/// - `Err(ModelError::InvalidLabel)` - If `label >= probabilities.len()`
pub fn softmax_cross_entropy_delta(
    probabilities: ArrayView1<f64>,
    label: usize,
) -> Result<Array1<f64>, ModelError> {
    if label >= probabilities.len() {
        return Err(ModelError::InvalidLabel(format!(
            "label {} is outside [0, {})",
            label,
            probabilities.len()
        )));
    }

    let mut delta = probabilities.to_owned();
    delta[label] -= 1.0;
    Ok(delta)
}
