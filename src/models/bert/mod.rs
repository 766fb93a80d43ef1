/// BERT for Sequence Classification
pub mod sequence_classification;

/// Model Variants
/// --------------

/// The personal data detector fine-tuned for Participa DF requests
pub static IA_CGDF: &str = "MirandaBiel/IA_CGDF";

/// The default model to use
pub static DEFAULT_MODEL: &str = IA_CGDF;
