use super::*;

#[test]
fn network_config_builds_requested_topology() {
    let config = NetworkConfig::new(6)
        .hidden_layer(5)
        .hidden_layer(4)
        .output_layer(3)
        .learning_rate(0.2)
        .seed(3);
    assert_eq!(config.layer_sizes(), &[6, 5, 4, 3]);

    let network = config.build().unwrap();
    assert_eq!(network.layer_sizes(), vec![6, 5, 4, 3]);
    assert_eq!(network.learning_rate(), 0.2);
    assert_eq!(network.layers()[2].activation(), Activation::Linear);
    assert_eq!(network.layers()[0].activation(), Activation::ReLU);
}

#[test]
fn network_config_defaults() {
    let network = NetworkConfig::new(2).output_layer(2).seed(0).build().unwrap();
    assert_eq!(network.learning_rate(), DEFAULT_LEARNING_RATE);

    for layer in network.layers() {
        assert!(
            layer
                .weights_matrix()
                .iter()
                .chain(layer.biases().iter())
                .all(|&v| (-1.0..=1.0).contains(&v))
        );
    }
}

#[test]
fn network_config_seed_matches_network_with_seed() {
    let from_config = NetworkConfig::new(4)
        .hidden_layer(3)
        .output_layer(2)
        .learning_rate(0.1)
        .seed(11)
        .build()
        .unwrap();
    let direct = Network::with_seed(&[4, 3, 2], 0.1, 11).unwrap();

    for (a, b) in from_config.layers().iter().zip(direct.layers()) {
        assert_eq!(a.weights_matrix(), b.weights_matrix());
        assert_eq!(a.biases(), b.biases());
    }
}

#[test]
fn network_config_init_range_bounds_parameters() {
    let network = NetworkConfig::new(10)
        .hidden_layer(20)
        .output_layer(5)
        .init_range(-0.05, 0.05)
        .seed(4)
        .build()
        .unwrap();

    for layer in network.layers() {
        assert!(layer.weights_matrix().iter().all(|w| w.abs() <= 0.05));
        assert!(layer.biases().iter().all(|b| b.abs() <= 0.05));
    }
}

#[test]
fn network_config_rejects_invalid_settings() {
    assert!(matches!(
        NetworkConfig::new(3).build(),
        Err(ModelError::InvalidTopology(_))
    ));
    assert!(matches!(
        NetworkConfig::new(3).hidden_layer(0).output_layer(2).build(),
        Err(ModelError::InvalidTopology(_))
    ));
    assert!(matches!(
        NetworkConfig::new(3).output_layer(2).learning_rate(-1.0).build(),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        NetworkConfig::new(3).output_layer(2).init_range(1.0, -1.0).build(),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        NetworkConfig::new(3)
            .output_layer(2)
            .init_range(f64::NEG_INFINITY, 1.0)
            .build(),
        Err(ModelError::InputValidationError(_))
    ));
}
