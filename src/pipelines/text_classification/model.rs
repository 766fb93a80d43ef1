use super::ClassId;

/// A trait for models that can be used for Text Classification
pub trait Classify {
    /// Predict the class of one normalized text
    fn classify(&self, text: &str) -> anyhow::Result<ClassId>;
}
