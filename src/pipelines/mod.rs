use std::fmt::Display;

/// Text Classification
pub mod text_classification;

/// The unique string token that identifies single-file classification
pub static TEXT: &str = "text";

/// The unique string token that identifies spreadsheet classification
pub static BATCH: &str = "batch";

/// Available Pipelines
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Pipeline {
    /// Classify the content of one text file
    Text,

    /// Classify every row of a table
    Batch,
}

impl Pipeline {
    /// Get the unique string token that identifies this pipeline
    pub fn as_str(&self) -> &'static str {
        match self {
            Pipeline::Text => TEXT,
            Pipeline::Batch => BATCH,
        }
    }
}

impl TryFrom<&str> for Pipeline {
    type Error = PipelineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "text" | "txt" => Ok(Pipeline::Text),
            "batch" | "xlsx" | "csv" => Ok(Pipeline::Batch),
            _ => Err(PipelineError::Unknown(value.to_string())),
        }
    }
}

impl Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline Error
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// No pipeline found for the given string
    #[error("no pipeline found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pipeline_names() {
        assert_eq!(Pipeline::try_from("text").ok(), Some(Pipeline::Text));
        assert_eq!(Pipeline::try_from("XLSX").ok(), Some(Pipeline::Batch));
        assert_eq!(Pipeline::Batch.to_string(), "batch");
        assert!(matches!(
            Pipeline::try_from("token-classification"),
            Err(PipelineError::Unknown(_))
        ));
    }
}
