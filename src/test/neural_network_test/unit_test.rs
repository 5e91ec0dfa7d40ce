use super::*;

#[test]
fn unit_forward_weighted_sum() {
    let mut relu = unit(array![0.5, -1.0, 2.0], 0.1, Activation::ReLU);
    let out = relu.forward(array![1.0, 2.0, 0.5].view()).unwrap();
    // 0.1 + 0.5 - 2.0 + 1.0 = -0.4
    assert_eq!(out, 0.0);
    assert_eq!(relu.output(), Some(0.0));
    assert_eq!(relu.last_input(), Some(&array![1.0, 2.0, 0.5]));

    let mut linear = unit(array![0.5, -1.0, 2.0], 0.1, Activation::Linear);
    let out = linear.forward(array![1.0, 2.0, 0.5].view()).unwrap();
    assert_relative_eq!(out, -0.4, epsilon = 1e-12);
}

#[test]
fn unit_forward_rejects_wrong_width() {
    let mut u = unit(array![0.5, -1.0], 0.0, Activation::ReLU);
    let result = u.forward(array![1.0, 2.0, 3.0].view());

    assert!(matches!(result, Err(ModelError::ShapeMismatch(_))));
    // nothing was cached by the rejected call
    assert_eq!(u.output(), None);
    assert_eq!(u.last_input(), None);
}

#[test]
fn unit_new_draws_from_initializer() {
    let mut initializer = WeightInitializer::from_seed(3);
    let u = Unit::new(5, Activation::ReLU, &mut initializer);

    assert_eq!(u.input_width(), 5);
    assert_eq!(u.activation(), Activation::ReLU);
    assert!(u.weights().iter().all(|w| (-1.0..=1.0).contains(w)));
    assert!((-1.0..=1.0).contains(&u.bias()));
    assert_eq!(u.output(), None);
    assert_eq!(u.gradient(), None);

    let mut again = WeightInitializer::from_seed(3);
    let v = Unit::new(5, Activation::ReLU, &mut again);
    assert_eq!(u.weights(), v.weights());
    assert_eq!(u.bias(), v.bias());
}

#[test]
fn unit_from_parameters_rejects_non_finite() {
    let result = Unit::from_parameters(array![1.0, f64::NAN], 0.0, Activation::Linear);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));

    let result = Unit::from_parameters(array![1.0], f64::INFINITY, Activation::Linear);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn unit_update_weights_applies_gradient_step() {
    let mut u = unit(array![0.2, -0.3], 0.5, Activation::Linear);
    u.forward(array![2.0, -1.0].view()).unwrap();
    u.set_gradient(0.5);
    u.update_weights(0.1).unwrap();

    // w_i -= 0.1 * 0.5 * x_i, b -= 0.1 * 0.5
    assert_relative_eq!(u.weights()[0], 0.2 - 0.1, epsilon = 1e-12);
    assert_relative_eq!(u.weights()[1], -0.3 + 0.05, epsilon = 1e-12);
    assert_relative_eq!(u.bias(), 0.45, epsilon = 1e-12);
    assert_eq!(u.gradient(), Some(0.5));
}

#[test]
fn unit_update_requires_forward_and_gradient() {
    let mut u = unit(array![0.2, -0.3], 0.5, Activation::Linear);
    u.set_gradient(1.0);
    assert!(matches!(
        u.update_weights(0.1),
        Err(ModelError::ProcessingError(_))
    ));

    let mut u = unit(array![0.2, -0.3], 0.5, Activation::Linear);
    u.forward(array![1.0, 1.0].view()).unwrap();
    assert!(matches!(
        u.update_weights(0.1),
        Err(ModelError::ProcessingError(_))
    ));
    // the failed update left the parameters alone
    assert_eq!(u.weights(), &array![0.2, -0.3]);
    assert_eq!(u.bias(), 0.5);
}

#[test]
fn unit_push_weight_widens_and_clears_cache() {
    let mut u = unit(array![1.0], 0.0, Activation::ReLU);
    u.forward(array![2.0].view()).unwrap();
    u.set_gradient(0.3);

    u.push_weight(-0.5);

    assert_eq!(u.input_width(), 2);
    assert_eq!(u.weights(), &array![1.0, -0.5]);
    assert_eq!(u.output(), None);
    assert_eq!(u.gradient(), None);
    assert_eq!(u.forward(array![2.0, 2.0].view()).unwrap(), 1.0);
}
