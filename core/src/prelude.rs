use serde::{Deserialize, Serialize};

/// Shared fixed-point configuration for each processing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Output word length in bits.
    pub word_length: u32,
    /// Fractional bits used when mapping [-1, 1] to integers.
    pub scaling: u32,
}

/// Input payload for a processing stage.
#[derive(Debug, Clone)]
pub struct StageInput {
    pub samples: Vec<f32>,
    pub timestamp: Option<f64>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<f32>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub peak: Option<f32>,
    pub codes: Option<Vec<i32>>,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("buffer exhaustion: {0}")]
    BufferExhaustion(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("overflow at sample {index}: code {code} exceeds {bits}-bit signed range")]
    Overflow { index: usize, code: i64, bits: u32 },
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing the sequential signal-conditioning stages.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}
