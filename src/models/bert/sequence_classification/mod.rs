/// Bert for Sequence Classification
pub mod model;

/// The model configuration
pub mod config;

/// Fixed-length encoding of texts
pub mod batcher;

/// Loading and running the classifier
pub mod inference;

pub use batcher::{Batch, Batcher};
pub use config::Config;
pub use inference::{select_device, Classifier};
pub use model::Model;
