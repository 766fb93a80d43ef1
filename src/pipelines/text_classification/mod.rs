/// The fixed label space
pub mod labels;

/// Common traits for text classification models
pub mod model;

/// Single text file classification
pub mod single;

/// Spreadsheet classification
pub mod batch;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{classify_sheet, classify_table};
pub use labels::{ClassId, LabelError};
pub use model::Classify;
pub use single::{classify_file, report};
