use serde::{Deserialize, Serialize};

/// Ancillary metadata accompanying a synthesized signal frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalAncillary {
    pub timestamp: f64,
    pub sample_rate: f32,
    pub duration: f32,
    pub frequency: f32,
    pub amplitude: f32,
    pub noise_amplitude: f32,
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Data payload representing one synthesized frame consumed by the
/// conditioning stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalPayload {
    pub samples: Vec<f32>,
    pub ancillary: SignalAncillary,
}

impl SignalPayload {
    pub fn new(samples: Vec<f32>, ancillary: SignalAncillary) -> Self {
        Self { samples, ancillary }
    }
}
