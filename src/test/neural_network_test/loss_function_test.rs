use super::*;

#[test]
fn cross_entropy_matches_negative_log() {
    let p = array![0.2, 0.5, 0.3];
    let loss = cross_entropy(p.view(), 1).unwrap();
    assert_relative_eq!(loss, -(0.5f64 + LOSS_EPSILON).ln(), epsilon = 1e-12);
}

#[test]
fn cross_entropy_is_finite_for_zero_probability() {
    let loss = cross_entropy(array![1.0, 0.0].view(), 1).unwrap();
    assert!(loss.is_finite());
    assert_relative_eq!(loss, -(LOSS_EPSILON.ln()), epsilon = 1e-9);
}

#[test]
fn cross_entropy_is_non_negative_and_decreasing() {
    let mut previous = f64::INFINITY;
    for &p in &[0.01, 0.1, 0.3, 0.5, 0.7, 0.9, 0.99, 0.999] {
        let probabilities = array![1.0 - p, p];
        let loss = cross_entropy(probabilities.view(), 1).unwrap();
        assert!(loss >= 0.0);
        assert!(loss < previous, "loss must decrease as p grows: {} at p = {}", loss, p);
        previous = loss;
    }

    let certain = cross_entropy(array![0.0, 1.0].view(), 1).unwrap();
    assert!(certain >= 0.0);
    assert!(certain < 1e-9);
}

#[test]
fn cross_entropy_rejects_out_of_range_label() {
    let result = cross_entropy(array![0.5, 0.5].view(), 2);
    assert!(matches!(result, Err(ModelError::InvalidLabel(_))));
}

#[test]
fn delta_is_probability_minus_one_hot() {
    let p = array![0.2, 0.5, 0.3];
    let delta = softmax_cross_entropy_delta(p.view(), 2).unwrap();

    assert_relative_eq!(delta[0], 0.2, epsilon = 1e-12);
    assert_relative_eq!(delta[1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(delta[2], -0.7, epsilon = 1e-12);
    // a distribution minus a one-hot vector sums to zero
    assert_abs_diff_eq!(delta.sum(), 0.0, epsilon = 1e-12);

    assert!(matches!(
        softmax_cross_entropy_delta(p.view(), 3),
        Err(ModelError::InvalidLabel(_))
    ));
}
