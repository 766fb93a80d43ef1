use std::{collections::BTreeMap, path::Path};

use candle_transformers::models::bert;
use serde::Deserialize;

/// Fields of a Hugging Face `config.json` used around the base BERT model
#[derive(Debug, Clone, Deserialize)]
struct HeadConfig {
    hidden_size: usize,
    max_position_embeddings: usize,
    #[serde(default)]
    pad_token_id: u32,
    #[serde(default)]
    num_labels: Option<usize>,
    #[serde(default)]
    id2label: BTreeMap<String, String>,
}

/// The Model Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// The base BERT config
    pub model: bert::Config,

    /// Size of the hidden state
    pub hidden_size: usize,

    /// Max position embeddings, the longest sequence the model accepts
    pub max_position_embeddings: usize,

    /// Index of the padding token
    pub pad_token_id: u32,

    /// A map from class ids to the class names stored with the model
    pub id2label: BTreeMap<usize, String>,
}

impl Config {
    /// Load a Hugging Face `config.json`
    pub fn load(config_file: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_file)
            .map_err(|e| anyhow!("Unable to read config file {}: {}", config_file.display(), e))?;

        Self::from_json(&content)
    }

    /// Parse the content of a Hugging Face `config.json`
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let model: bert::Config = serde_json::from_str(content)
            .map_err(|e| anyhow!("Unable to load Hugging Face Config file: {}", e))?;

        let head: HeadConfig = serde_json::from_str(content)
            .map_err(|e| anyhow!("Unable to load Hugging Face Config file: {}", e))?;

        let mut id2label = BTreeMap::new();
        for (id, label) in head.id2label {
            let id = id
                .parse::<usize>()
                .map_err(|_| anyhow!("Invalid class id in id2label: {}", id))?;

            id2label.insert(id, label);
        }

        // Configs without an explicit label map default to two anonymous classes
        if id2label.is_empty() {
            let n_classes = head.num_labels.unwrap_or(2);

            id2label = (0..n_classes).map(|id| (id, format!("LABEL_{id}"))).collect();
        }

        Ok(Self {
            model,
            hidden_size: head.hidden_size,
            max_position_embeddings: head.max_position_embeddings,
            pad_token_id: head.pad_token_id,
            id2label,
        })
    }

    /// Total number of classes
    pub fn n_classes(&self) -> usize {
        self.id2label.len()
    }
}
