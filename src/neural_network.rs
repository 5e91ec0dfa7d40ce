/// Module that contains the activation functions, softmax and argmax
pub mod activation;
/// Module that contains the seedable random source for parameter initialization
pub mod initializer;
/// Module that contains the layer implementation
pub mod layer;
/// Module that contains the softmax cross-entropy loss and its gradient
pub mod loss_function;
/// Module that contains the network: forward pass, backpropagation, training and evaluation
pub mod network;
/// Module that contains the network configuration builder
pub mod network_config;
/// Module that contains the single computational unit
pub mod unit;

pub use activation::*;
pub use initializer::WeightInitializer;
pub use layer::*;
pub use loss_function::*;
pub use network::*;
pub use network_config::*;
pub use unit::*;
