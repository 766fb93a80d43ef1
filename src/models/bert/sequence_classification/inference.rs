use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use log::info;
use tokenizers::Tokenizer;

use crate::{
    pipelines::text_classification::{ClassId, Classify},
    utils::classes::argmax,
};

use super::{Batcher, Config, Model};

/// Select the compute device: the first CUDA device when available, the CPU otherwise
pub fn select_device(force_cpu: bool) -> anyhow::Result<Device> {
    if force_cpu {
        return Ok(Device::Cpu);
    }

    Ok(Device::cuda_if_available(0)?)
}

/// Human readable name of a device
pub fn device_name(device: &Device) -> &'static str {
    if device.is_cuda() {
        "cuda"
    } else if device.is_metal() {
        "metal"
    } else {
        "cpu"
    }
}

/// The tokenizer, model and device of one run, loaded once and shared by every classification
pub struct Classifier {
    /// Tokenizer and target device
    batcher: Batcher,
    model: Model,
}

impl Classifier {
    /// Load the tokenizer and model from a local model directory
    pub fn load(model_dir: &Path, max_seq_length: usize, device: Device) -> anyhow::Result<Self> {
        // Load model configuration
        let config = Config::load(&model_dir.join("config.json"))?;

        if config.n_classes() != ClassId::ALL.len() {
            return Err(anyhow!(
                "Expected a model with {} classes, found {}",
                ClassId::ALL.len(),
                config.n_classes()
            ));
        }

        // Initialize tokenizer
        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| anyhow!("Unable to load tokenizer: {}", e))?;

        let max_seq_length = max_seq_length.min(config.max_position_embeddings);

        let batcher = Batcher::new(tokenizer, config.pad_token_id, max_seq_length, device.clone())?;

        // Load pre-trained model weights
        info!("Loading weights...");

        let vb = load_weights(model_dir, &device)?;

        // Create model using loaded weights
        info!("Creating model...");

        let model = Model::load(vb, &config)
            .map_err(|e| anyhow!("Unable to load trained model weights: {}", e))?;

        Ok(Self { batcher, model })
    }

    /// Class logits for a single text
    pub fn scores(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let batch = self.batcher.batch(&[text])?;

        let logits = self.model.infer(&batch)?;

        Ok(logits.squeeze(0)?.to_dtype(DType::F32)?.to_vec1::<f32>()?)
    }
}

impl Classify for Classifier {
    fn classify(&self, text: &str) -> anyhow::Result<ClassId> {
        let scores = self.scores(text)?;

        let index = argmax(&scores).ok_or_else(|| anyhow!("The model returned no usable scores"))?;

        Ok(ClassId::try_from(index)?)
    }
}

/// Weight files, in order of preference
static WEIGHT_FILES: [&str; 2] = ["model.safetensors", "pytorch_model.bin"];

fn weights_file(model_dir: &Path) -> anyhow::Result<PathBuf> {
    WEIGHT_FILES
        .iter()
        .map(|name| model_dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            anyhow!(
                "No model weights ({}) in {}",
                WEIGHT_FILES.join(", "),
                model_dir.display()
            )
        })
}

fn load_weights(model_dir: &Path, device: &Device) -> anyhow::Result<VarBuilder<'static>> {
    let path = weights_file(model_dir)?;

    let vb = if path.extension().is_some_and(|ext| ext == "safetensors") {
        let data = std::fs::read(&path)?;

        VarBuilder::from_buffered_safetensors(data, DType::F32, device)?
    } else {
        VarBuilder::from_pth(&path, DType::F32, device)?
    };

    Ok(vb)
}
