use crate::math::stats::StatsHelper;
use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::processing::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;

/// Normalization stage that rescales a sequence to unit peak magnitude.
///
/// An all-zero input has no meaningful scale and is rejected as
/// `DegenerateInput` rather than dividing by zero.
pub struct NormalizeStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    logger: LogManager,
}

impl NormalizeStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::new(),
        }
    }
}

impl ProcessingStage for NormalizeStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        if self.config.is_none() {
            return Err(StageError::Internal("stage not initialized".into()));
        }
        if input.samples.is_empty() {
            return Err(StageError::InvalidInput("no samples provided".into()));
        }

        let peak = StatsHelper::peak_abs(&input.samples);
        if peak == 0.0 {
            return Err(StageError::DegenerateInput(
                "all samples are zero, peak scale undefined".into(),
            ));
        }

        let mut buffer = self.pool.checkout(input.samples.len())?;
        for (slot, &value) in buffer.iter_mut().zip(input.samples.iter()) {
            *slot = value / peak;
        }

        let rms = StatsHelper::rms(&buffer);
        self.logger
            .record_stage("NormalizeStage", &format!("peak {:.4} rms {:.4}", peak, rms));

        let metadata = StageMetadata {
            peak: Some(peak),
            notes: vec![format!("normalize peak {:.4}", peak)],
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

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_config() -> StageConfig {
        StageConfig {
            word_length: 16,
            scaling: 7,
        }
    }

    #[test]
    fn normalize_rescales_to_unit_peak() {
        let mut stage = NormalizeStage::new(4);
        stage.initialize(&stage_config()).unwrap();

        let input = StageInput {
            samples: vec![1.0, -4.0, 2.0],
            timestamp: Some(0.0),
        };
        let output = stage.execute(input).unwrap();

        assert_eq!(output.samples, vec![0.25, -1.0, 0.5]);
        assert!((StatsHelper::peak_abs(&output.samples) - 1.0).abs() < 1e-6);
        assert_eq!(output.metadata.peak, Some(4.0));
        stage.cleanup();
    }

    #[test]
    fn normalize_rejects_all_zero_input() {
        let mut stage = NormalizeStage::new(4);
        stage.initialize(&stage_config()).unwrap();

        let input = StageInput {
            samples: vec![0.0; 8],
            timestamp: None,
        };
        let err = stage.execute(input).unwrap_err();
        assert!(matches!(err, StageError::DegenerateInput(_)));
    }

    #[test]
    fn normalize_rejects_empty_input() {
        let mut stage = NormalizeStage::new(4);
        stage.initialize(&stage_config()).unwrap();

        let input = StageInput {
            samples: Vec::new(),
            timestamp: None,
        };
        assert!(matches!(
            stage.execute(input),
            Err(StageError::InvalidInput(_))
        ));
    }
}
