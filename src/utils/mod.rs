/// File utilities
pub mod files;

/// Hugging Face utilities
pub mod hugging_face;

/// Text normalization
pub mod text;

/// Utilities for classification tasks
pub mod classes;
