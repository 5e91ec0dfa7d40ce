//! Train a classifier on comma-separated data and report test accuracy
//!
//! Usage: cargo run --bin train_network -- --train mnist_train.csv --test mnist_test.csv --layers 128,10

use anyhow::{Context, Result, bail};
use clap::Parser;
use rustynet::dataset::{CsvOptions, load_csv};
use rustynet::neural_network::{DEFAULT_LEARNING_RATE, NetworkConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Train a feed-forward classifier")]
struct Args {
    /// Training data (CSV, one `label,f1,...,fn` sample per line)
    #[arg(long)]
    train: String,

    /// Test data (same format as the training data)
    #[arg(long)]
    test: String,

    /// Hidden and output layer widths; the last entry is the number of classes
    #[arg(long, value_delimiter = ',', default_value = "128,10")]
    layers: Vec<usize>,

    /// Learning rate
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// Number of passes over the training data
    #[arg(long, default_value_t = 50)]
    epochs: usize,

    /// Seed for the weight initializer
    #[arg(long)]
    seed: Option<u64>,

    /// Divisor applied to every feature value
    #[arg(long, default_value_t = 255.0)]
    scale: f64,

    /// Reject lines that do not carry exactly this many features
    #[arg(long)]
    expected_features: Option<usize>,

    /// Skip the first line of each file
    #[arg(long)]
    header: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut options = CsvOptions::default()
        .with_scale(args.scale)
        .with_header(args.header);
    if let Some(n) = args.expected_features {
        options = options.with_expected_features(n);
    }

    println!("Loading data...");
    let train_data = load_csv(&args.train, &options)
        .with_context(|| format!("failed to load training data from {}", args.train))?;
    let test_data = load_csv(&args.test, &options)
        .with_context(|| format!("failed to load test data from {}", args.test))?;
    println!("Training samples: {}", train_data.labels().len());
    println!("Test samples: {}", test_data.labels().len());

    if args.layers.is_empty() {
        bail!("at least one layer width is required");
    }

    let mut config = NetworkConfig::new(train_data.n_features()).learning_rate(args.learning_rate);
    for &width in &args.layers {
        config = config.hidden_layer(width);
    }
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    let mut network = config.build().context("failed to build the network")?;
    network.summary();

    println!("\nStarting training...");
    let losses = network
        .train(&train_data, args.epochs)
        .context("training failed")?;
    for (epoch, loss) in losses.iter().enumerate() {
        println!("Epoch {}, Loss: {:.6}", epoch + 1, loss);
    }

    println!("\nStarting testing...");
    let accuracy = network.test(&test_data).context("testing failed")?;
    println!("Final Test Accuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}
