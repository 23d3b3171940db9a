use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sigcore::payload::{SignalAncillary, SignalPayload};
use std::f32::consts::PI;

/// Configuration for synthesizing the noisy sine stimulus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sine frequency in Hz.
    pub frequency: f32,
    /// Peak amplitude before noise and normalization.
    pub amplitude: f32,
    /// Sampling frequency in Hz.
    pub sample_rate: f32,
    /// Capture length in seconds.
    pub duration: f32,
    /// Uniform noise bound; each sample gets an independent draw from
    /// [-noise, +noise].
    pub noise: f32,
    pub seed: u64,
    pub description: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            frequency: 10.0,
            amplitude: 10.0,
            sample_rate: 100.0,
            duration: 2.0,
            noise: 0.1,
            seed: 0,
            description: None,
        }
    }
}

/// Sample instants from 0 (inclusive) to the duration (exclusive), spaced by
/// 1/sample-rate. Truncates to whole samples; a capture shorter than one
/// sample period is empty.
pub fn build_time_base(sample_rate: f32, duration: f32) -> Vec<f32> {
    let count = (duration * sample_rate) as usize;
    (0..count).map(|i| i as f32 / sample_rate).collect()
}

fn build_sample_vector(config: &GeneratorConfig) -> anyhow::Result<Vec<f32>> {
    if config.sample_rate <= 0.0 {
        anyhow::bail!("sample rate must be positive, got {}", config.sample_rate);
    }
    if config.noise < 0.0 {
        anyhow::bail!("noise amplitude must be non-negative, got {}", config.noise);
    }

    let times = build_time_base(config.sample_rate, config.duration);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(times.len());

    for &t in &times {
        let clean = config.amplitude * (2.0 * PI * config.frequency * t).sin();
        let jitter = if config.noise > 0.0 {
            rng.gen_range(-config.noise..config.noise)
        } else {
            0.0
        };
        samples.push(clean + jitter);
    }

    Ok(samples)
}

pub fn build_signal_payload_from_config(
    config: &GeneratorConfig,
) -> anyhow::Result<SignalPayload> {
    let samples =
        build_sample_vector(config).context("synthesizing stimulus sample vector")?;
    let ancillary = SignalAncillary {
        timestamp: 0.0,
        sample_rate: config.sample_rate,
        duration: config.duration,
        frequency: config.frequency,
        amplitude: config.amplitude,
        noise_amplitude: config.noise,
        seed: config.seed,
        description: config.description.clone(),
    };

    Ok(SignalPayload::new(samples, ancillary))
}
