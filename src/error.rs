/// Error types that can occur during network construction, training and evaluation
///
/// # Variants
///
/// - `ShapeMismatch` - A vector's length does not match the width declared by a unit, layer or network
/// - `InvalidLabel` - A class label lies outside `[0, output_width)`
/// - `InvalidTopology` - The requested layer layout cannot form a valid network
/// - `InputValidationError` - The input data or hyper-parameters do not meet the expected rules
/// - `ProcessingError` - An operation was called before the state it depends on exists
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    ShapeMismatch(String),
    InvalidLabel(String),
    InvalidTopology(String),
    InputValidationError(String),
    ProcessingError(String),
}

impl ModelError {
    /// Builds a `ShapeMismatch` error describing which width was expected where.
    pub(crate) fn shape_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        ModelError::ShapeMismatch(format!(
            "{} expects a vector of length {}, got {}",
            context, expected, actual
        ))
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            ModelError::InvalidLabel(msg) => write!(f, "Invalid label: {}", msg),
            ModelError::InvalidTopology(msg) => write!(f, "Invalid topology: {}", msg),
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}

/// Input/Output error types that can occur while loading a dataset from disk
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations
/// - `ParseError` - A line of the data file could not be parsed (line numbers are 1-based)
/// - `Model` - The parsed records were rejected when assembling the dataset
#[derive(Debug)]
pub enum IoError {
    StdIoError(std::io::Error),
    ParseError { line: usize, message: String },
    Model(ModelError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::StdIoError(e) => write!(f, "IO error: {}", e),
            IoError::ParseError { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            IoError::Model(e) => write!(f, "Dataset error: {}", e),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIoError(e) => Some(e),
            IoError::ParseError { .. } => None,
            IoError::Model(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::StdIoError(e)
    }
}

impl From<ModelError> for IoError {
    fn from(e: ModelError) -> Self {
        IoError::Model(e)
    }
}
