use candle_core::{IndexOp, Module, Tensor};
use candle_nn::{linear, Linear, VarBuilder};
use candle_transformers::models::bert::BertModel;

use super::{Batch, Config};

/// BERT for sequence Classification
pub struct Model {
    /// The base BERT model
    pub model: BertModel,

    /// Dense layer of the pooler applied to the first token
    pub pooler: Linear,

    /// Linear layer for sequence classification
    pub output: Linear,
}

/// Define model behavior
impl Model {
    /// Load the weights of a Hugging Face `BertForSequenceClassification` checkpoint
    pub fn load(vb: VarBuilder, config: &Config) -> candle_core::Result<Self> {
        let model = BertModel::load(vb.pp("bert"), &config.model)?;

        let pooler = linear(
            config.hidden_size,
            config.hidden_size,
            vb.pp("bert").pp("pooler").pp("dense"),
        )?;

        let output = linear(config.hidden_size, config.n_classes(), vb.pp("classifier"))?;

        Ok(Self {
            model,
            pooler,
            output,
        })
    }

    /// Defines forward pass for inference, returning one row of class logits per item
    pub fn infer(&self, input: &Batch) -> candle_core::Result<Tensor> {
        let hidden_states = self
            .model
            .forward(&input.tokens, &input.token_types, Some(&input.mask_pad))?;

        // Pool on the [CLS] token
        let first_token = hidden_states.i((.., 0))?;
        let pooled_output = self.pooler.forward(&first_token)?.tanh()?;

        self.output.forward(&pooled_output)
    }
}
