use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use sigcore::encoding::encode_word;
use sigcore::payload::SignalPayload;
use sigcore::prelude::{ProcessingStage, StageInput};
use sigcore::processing::{NormalizeStage, QuantizeStage};
use sigcore::telemetry::MetricsRecorder;
use std::sync::Arc;

pub struct WorkflowResult {
    pub lines: Vec<String>,
    pub sample_count: usize,
    pub peak: f32,
    pub code_min: i32,
    pub code_max: i32,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn execute(&self, payload: &SignalPayload) -> anyhow::Result<WorkflowResult> {
        let result = self.execute_inner(payload);
        if result.is_err() {
            self.metrics.record_error();
        }
        result
    }

    fn execute_inner(&self, payload: &SignalPayload) -> anyhow::Result<WorkflowResult> {
        let stage_config = self.config.to_stage_config();

        let mut normalize_stage = NormalizeStage::new(1);
        normalize_stage
            .initialize(&stage_config)
            .context("initializing normalize stage")?;
        let normalize_output = normalize_stage
            .execute(StageInput {
                samples: payload.samples.clone(),
                timestamp: Some(payload.ancillary.timestamp),
            })
            .context("executing normalize stage")?;
        normalize_stage.cleanup();

        let mut quantize_stage = QuantizeStage::new(1);
        quantize_stage
            .initialize(&stage_config)
            .context("initializing quantize stage")?;
        let quantize_output = quantize_stage
            .execute(StageInput {
                samples: normalize_output.samples.clone(),
                timestamp: Some(payload.ancillary.timestamp),
            })
            .context("executing quantize stage")?;
        quantize_stage.cleanup();

        let codes = quantize_output
            .metadata
            .codes
            .context("quantize stage produced no codes")?;

        let mut lines = Vec::with_capacity(codes.len());
        for (index, &code) in codes.iter().enumerate() {
            let line = encode_word(code, stage_config.word_length)
                .with_context(|| format!("encoding sample {}", index))?;
            lines.push(line);
        }

        let (code_min, code_max) = codes
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &c| (lo.min(c), hi.max(c)));
        let peak = normalize_output.metadata.peak.unwrap_or(0.0);

        let mut notes = normalize_output.metadata.notes;
        notes.extend(quantize_output.metadata.notes);

        let sample_count = lines.len();
        self.metrics.record_run(sample_count);

        Ok(WorkflowResult {
            lines,
            sample_count,
            peak,
            code_min,
            code_max,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_signal_payload_from_config, GeneratorConfig};
    use sigcore::encoding::decode_word;

    fn workflow_config(generator: GeneratorConfig) -> WorkflowConfig {
        WorkflowConfig::from_generator(generator, 16, 7)
    }

    #[test]
    fn runner_emits_one_line_per_sample() {
        let cfg = workflow_config(GeneratorConfig::default());
        let runner = Runner::new(cfg.clone());
        let payload = build_signal_payload_from_config(&cfg.generator).unwrap();

        let result = runner.execute(&payload).unwrap();
        assert_eq!(result.sample_count, 200);
        assert_eq!(result.lines.len(), 200);
        assert!(result
            .lines
            .iter()
            .all(|line| line.len() == 16 && line.chars().all(|c| c == '0' || c == '1')));
        assert_eq!(runner.metrics().snapshot().samples_emitted, 200);
    }

    #[test]
    fn runner_output_normalizes_to_full_scale() {
        // Noise-free 40 Hz sampling of a 10 Hz sine hits the exact peak, so
        // normalization maps it to 1.0 and quantization to 2^7.
        let generator = GeneratorConfig {
            noise: 0.0,
            sample_rate: 40.0,
            ..Default::default()
        };
        let cfg = workflow_config(generator);
        let runner = Runner::new(cfg.clone());
        let payload = build_signal_payload_from_config(&cfg.generator).unwrap();

        let result = runner.execute(&payload).unwrap();
        assert_eq!(result.peak, 10.0);
        assert_eq!(result.code_max, 128);
        assert_eq!(result.code_min, -128);
        assert_eq!(decode_word(&result.lines[0]).unwrap(), 0);
        assert_eq!(result.lines[1], "0000000010000000");
        assert_eq!(result.lines[3], "1111111110000000");
    }

    #[test]
    fn runner_reports_degenerate_payloads() {
        let generator = GeneratorConfig {
            amplitude: 0.0,
            noise: 0.0,
            ..Default::default()
        };
        let cfg = workflow_config(generator);
        let runner = Runner::new(cfg.clone());
        let payload = build_signal_payload_from_config(&cfg.generator).unwrap();

        assert!(runner.execute(&payload).is_err());
        assert_eq!(runner.metrics().snapshot().errors, 1);
    }
}
