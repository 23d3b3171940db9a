use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::processing::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;

/// Fixed-point quantization stage: code = round(value * 2^scaling).
///
/// Codes outside the signed word range are reported as `Overflow` with the
/// offending sample index instead of wrapping through the encoder mask.
pub struct QuantizeStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    logger: LogManager,
}

impl QuantizeStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl ProcessingStage for QuantizeStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        if config.word_length == 0 || config.word_length > 32 {
            return Err(StageError::InvalidInput(format!(
                "word length {} outside supported 1..=32",
                config.word_length
            )));
        }
        if config.scaling >= config.word_length {
            return Err(StageError::InvalidInput(format!(
                "scaling {} leaves no sign bit in a {}-bit word",
                config.scaling, config.word_length
            )));
        }
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if input.samples.is_empty() {
            return Err(StageError::InvalidInput("no samples to quantize".into()));
        }

        let scale = (1_i64 << config.scaling) as f32;
        let min_code = -(1_i64 << (config.word_length - 1));
        let max_code = (1_i64 << (config.word_length - 1)) - 1;

        let mut codes = Vec::with_capacity(input.samples.len());
        for (index, &value) in input.samples.iter().enumerate() {
            let code = (value * scale).round() as i64;
            if code < min_code || code > max_code {
                return Err(StageError::Overflow {
                    index,
                    code,
                    bits: config.word_length,
                });
            }
            codes.push(code as i32);
        }

        let mut buffer = self.pool.checkout(codes.len())?;
        for (slot, &code) in buffer.iter_mut().zip(codes.iter()) {
            *slot = code as f32;
        }

        let (lo, hi) = codes
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &c| (lo.min(c), hi.max(c)));
        self.logger.record_stage(
            "QuantizeStage",
            &format!("{} codes in [{}, {}]", codes.len(), lo, hi),
        );

        let metadata = StageMetadata {
            codes: Some(codes),
            notes: vec![format!("quantize range [{}, {}]", lo, hi)],
            ..Default::default()
        };

        Ok(StageOutput {
            samples: buffer,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.config = None;
    }
}
