use candle_core::{Device, Tensor};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Encoded model input
#[derive(Clone, Debug)]
pub struct Batch {
    /// Token ids, `[batch_size, seq_length]`
    pub tokens: Tensor,

    /// Segment ids, `[batch_size, seq_length]`
    pub token_types: Tensor,

    /// 1 for real tokens and 0 for padding, `[batch_size, seq_length]`
    pub mask_pad: Tensor,
}

/// Struct for encoding texts into fixed-length model input
#[derive(Clone)]
pub struct Batcher {
    /// Tokenizer for converting text to token IDs
    tokenizer: Tokenizer,

    /// Length of every encoded sequence
    max_seq_length: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    device: Device,
}

impl Batcher {
    /// Creates a new batcher. Every text is truncated or padded to exactly `max_seq_length` tokens.
    pub fn new(
        mut tokenizer: Tokenizer,
        pad_token_id: u32,
        max_seq_length: usize,
        device: Device,
    ) -> anyhow::Result<Self> {
        let pad_token = tokenizer
            .id_to_token(pad_token_id)
            .unwrap_or_else(|| "[PAD]".to_string());

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(max_seq_length),
            pad_id: pad_token_id,
            pad_token,
            ..Default::default()
        }));

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_seq_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Unable to configure truncation: {}", e))?;

        Ok(Self {
            tokenizer,
            max_seq_length,
            device,
        })
    }

    /// Encode texts into a batch, one row per text
    pub fn batch(&self, items: &[&str]) -> anyhow::Result<Batch> {
        let batch_size = items.len();
        let capacity = batch_size * self.max_seq_length;

        let mut tokens = Vec::with_capacity(capacity);
        let mut token_types = Vec::with_capacity(capacity);
        let mut mask_pad = Vec::with_capacity(capacity);

        for input in items {
            let encoding = self
                .tokenizer
                .encode(*input, true)
                .map_err(|e| anyhow!("Unable to encode text: {}", e))?;

            if encoding.len() != self.max_seq_length {
                return Err(anyhow!(
                    "Encoded {} tokens instead of {}",
                    encoding.len(),
                    self.max_seq_length
                ));
            }

            tokens.extend_from_slice(encoding.get_ids());
            token_types.extend_from_slice(encoding.get_type_ids());
            mask_pad.extend_from_slice(encoding.get_attention_mask());
        }

        let shape = (batch_size, self.max_seq_length);

        Ok(Batch {
            tokens: Tensor::from_vec(tokens, shape, &self.device)?,
            token_types: Tensor::from_vec(token_types, shape, &self.device)?,
            mask_pad: Tensor::from_vec(mask_pad, shape, &self.device)?,
        })
    }
}
