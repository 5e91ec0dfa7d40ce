use crate::ModelError;
use crate::dataset::InMemoryDataset;
use crate::error::IoError;
use log::debug;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Divisor applied to raw 8-bit pixel values so features land in `[0, 1]`
pub const DEFAULT_PIXEL_SCALE: f64 = 255.0;

/// How to interpret a comma-separated data file.
///
/// Every data line has the form `label,f1,f2,...,fn` where `label` is a non-negative
/// integer class id. Blank lines are ignored.
///
/// # Fields
///
/// - `scale` - Each feature is divided by this value (default 255.0)
/// - `expected_features` - If set, every line must carry exactly this many features
/// - `skip_header` - Ignore the first line of the input
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub scale: f64,
    pub expected_features: Option<usize>,
    pub skip_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_PIXEL_SCALE,
            expected_features: None,
            skip_header: false,
        }
    }
}

impl CsvOptions {
    /// Options for feature values that are already on the desired scale
    pub fn unscaled() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_expected_features(mut self, n_features: usize) -> Self {
        self.expected_features = Some(n_features);
        self
    }

    pub fn with_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }
}

/// Loads a labelled dataset from a comma-separated file
///
/// # Parameters
///
/// - `path` - File to read
/// - `options` - Parsing options
///
/// # Returns
///
/// - `Ok(InMemoryDataset)` - One sample per data line
/// - `Err(IoError::StdIoError)` - The file could not be opened or read
/// - `Err(IoError::ParseError)` - A line is malformed
/// - `Err(IoError::Model)` - The options are invalid
///
/// # Example
/// ```no_run
/// use rustynet::dataset::{CsvOptions, load_csv};
///
/// let train = load_csv("mnist_train.csv", &CsvOptions::default().with_expected_features(784)).unwrap();
/// ```
pub fn load_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<InMemoryDataset, IoError> {
    let file = File::open(path.as_ref())?;
    let dataset = read_csv(BufReader::new(file), options)?;
    debug!(
        "Loaded {} samples from {}",
        dataset.labels().len(),
        path.as_ref().display()
    );
    Ok(dataset)
}

/// Parses a labelled dataset from comma-separated text held in memory
///
/// Same format and errors as [`load_csv`].
pub fn parse_csv_str(content: &str, options: &CsvOptions) -> Result<InMemoryDataset, IoError> {
    read_csv(content.as_bytes(), options)
}

/// Parses a labelled dataset from any buffered reader
pub fn read_csv<R: BufRead>(reader: R, options: &CsvOptions) -> Result<InMemoryDataset, IoError> {
    if !options.scale.is_finite() || options.scale <= 0.0 {
        return Err(ModelError::InputValidationError(format!(
            "Feature scale must be positive and finite, got {}",
            options.scale
        ))
        .into());
    }

    let mut labels = Vec::new();
    let mut values = Vec::new();
    let mut width = options.expected_features;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if (options.skip_header && index == 0) || line.trim().is_empty() {
            continue;
        }

        let mut tokens = line.split(',');
        let label_token = tokens.next().unwrap_or("").trim();
        let label = label_token
            .parse::<usize>()
            .map_err(|e| IoError::ParseError {
                line: line_no,
                message: format!("invalid label '{}': {}", label_token, e),
            })?;

        let start = values.len();
        for token in tokens {
            let token = token.trim();
            let value = token.parse::<f64>().map_err(|e| IoError::ParseError {
                line: line_no,
                message: format!("invalid feature '{}': {}", token, e),
            })?;
            if !value.is_finite() {
                return Err(IoError::ParseError {
                    line: line_no,
                    message: format!("feature '{}' is not finite", token),
                });
            }
            values.push(value / options.scale);
        }

        let n_features = values.len() - start;
        match width {
            Some(w) if w != n_features => {
                return Err(IoError::ParseError {
                    line: line_no,
                    message: format!("expected {} features, got {}", w, n_features),
                });
            }
            Some(_) => {}
            None => width = Some(n_features),
        }

        labels.push(label);
    }

    let n_features = if labels.is_empty() {
        0
    } else {
        width.unwrap_or(0)
    };
    let features = Array2::from_shape_vec((labels.len(), n_features), values).map_err(|e| {
        ModelError::ProcessingError(format!("Failed to assemble feature matrix: {}", e))
    })?;

    Ok(InMemoryDataset::new(features, labels)?)
}
