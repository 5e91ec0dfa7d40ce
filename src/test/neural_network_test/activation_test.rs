use super::*;

#[test]
fn relu_and_linear_apply() {
    assert_eq!(Activation::ReLU.apply(2.5), 2.5);
    assert_eq!(Activation::ReLU.apply(-3.0), 0.0);
    assert_eq!(Activation::ReLU.apply(0.0), 0.0);
    assert_eq!(Activation::Linear.apply(-3.0), -3.0);
}

#[test]
fn derivative_from_output() {
    assert_eq!(Activation::ReLU.derivative_from_output(0.7), 1.0);
    assert_eq!(Activation::ReLU.derivative_from_output(0.0), 0.0);
    assert_eq!(Activation::Linear.derivative_from_output(-4.0), 1.0);
    assert_eq!(Activation::Linear.derivative_from_output(0.0), 1.0);
}

#[test]
fn softmax_is_a_distribution() {
    let probabilities = softmax(array![1.0, 2.0, 3.0].view());

    assert_relative_eq!(probabilities.sum(), 1.0, epsilon = 1e-12);
    assert!(probabilities.iter().all(|&p| p >= 0.0));
    // monotone in the logits
    assert!(probabilities[0] < probabilities[1] && probabilities[1] < probabilities[2]);
    assert_relative_eq!(
        probabilities[2],
        1.0 / (1.0 + (-1.0f64).exp() + (-2.0f64).exp()),
        epsilon = 1e-12
    );
}

#[test]
fn softmax_handles_large_logits() {
    let probabilities = softmax(array![1000.0, 1001.0, -1000.0].view());

    assert!(probabilities.iter().all(|p| p.is_finite()));
    assert_relative_eq!(probabilities.sum(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(probabilities[1] / probabilities[0], 1.0f64.exp(), epsilon = 1e-9);
    assert_eq!(probabilities[2], 0.0);
}

#[test]
fn softmax_is_shift_invariant() {
    let a = softmax(array![0.3, -1.2, 2.0].view());
    let b = softmax(array![10.3, 8.8, 12.0].view());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_relative_eq!(x, y, epsilon = 1e-12);
    }
}

#[test]
fn argmax_takes_first_on_ties() {
    assert_eq!(argmax(array![0.1, 0.7, 0.2].view()), Some(1));
    assert_eq!(argmax(array![0.4, 0.4, 0.2].view()), Some(0));
    assert_eq!(argmax(array![0.2, 0.4, 0.4].view()), Some(1));
    assert_eq!(argmax(Array1::<f64>::zeros(0).view()), None);
}
