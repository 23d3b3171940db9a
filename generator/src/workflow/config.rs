use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sigcore::prelude::StageConfig;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    #[serde(flatten)]
    pub generator: GeneratorConfig,
    /// Output word length in bits.
    pub word_length: u32,
    /// Fractional bits of the fixed-point representation.
    pub scaling: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            word_length: 16,
            scaling: 7,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_generator(generator: GeneratorConfig, word_length: u32, scaling: u32) -> Self {
        Self {
            generator,
            word_length,
            scaling,
        }
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            word_length: self.word_length,
            scaling: self.scaling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_generator_produces_stage_config() {
        let cfg = WorkflowConfig::from_generator(GeneratorConfig::default(), 16, 7);
        let stage = cfg.to_stage_config();
        assert_eq!(stage.word_length, 16);
        assert_eq!(stage.scaling, 7);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"frequency: 5.0\nsample_rate: 200.0\nduration: 1.0\nword_length: 12\nscaling: 10\nseed: 7\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.generator.frequency, 5.0);
        assert_eq!(cfg.generator.seed, 7);
        assert_eq!(cfg.word_length, 12);
        // Unlisted fields keep their defaults.
        assert_eq!(cfg.generator.noise, 0.1);
    }
}
