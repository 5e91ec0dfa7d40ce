pub use crate::dataset::{CsvOptions, Dataset, InMemoryDataset, load_csv, parse_csv_str};
pub use crate::error::{IoError, ModelError};
pub use crate::neural_network::{
    Activation, GradientSignal, Layer, Network, NetworkConfig, Unit, WeightInitializer,
};
