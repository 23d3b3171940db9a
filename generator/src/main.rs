use anyhow::Context;
use clap::Parser;
use generator::profile::{build_signal_payload_from_config, GeneratorConfig};
use serde_json::json;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Fixed-point stimulus file generator for the HDL testbench")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Output stimulus file, one binary word per line
    #[arg(long, default_value = "signal.data")]
    output: PathBuf,
    /// Sine frequency in Hz
    #[arg(long)]
    frequency: Option<f32>,
    /// Peak amplitude before noise and normalization
    #[arg(long)]
    amplitude: Option<f32>,
    /// Sampling frequency in Hz
    #[arg(long)]
    sample_rate: Option<f32>,
    /// Capture length in seconds
    #[arg(long)]
    duration: Option<f32>,
    /// Uniform noise bound
    #[arg(long)]
    noise: Option<f32>,
    /// Noise generator seed
    #[arg(long)]
    seed: Option<u64>,
    /// Output word length in bits
    #[arg(long)]
    word_length: Option<u32>,
    /// Fractional bits of the fixed-point representation
    #[arg(long)]
    scaling: Option<u32>,
    /// Append a JSON run record to the run log
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn resolve_config(args: &Args) -> anyhow::Result<WorkflowConfig> {
    let mut config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };

    if let Some(frequency) = args.frequency {
        config.generator.frequency = frequency;
    }
    if let Some(amplitude) = args.amplitude {
        config.generator.amplitude = amplitude;
    }
    if let Some(sample_rate) = args.sample_rate {
        config.generator.sample_rate = sample_rate;
    }
    if let Some(duration) = args.duration {
        config.generator.duration = duration;
    }
    if let Some(noise) = args.noise {
        config.generator.noise = noise;
    }
    if let Some(seed) = args.seed {
        config.generator.seed = seed;
    }
    if let Some(word_length) = args.word_length {
        config.word_length = word_length;
    }
    if let Some(scaling) = args.scaling {
        config.scaling = scaling;
    }

    Ok(config)
}

fn write_stimulus(path: &PathBuf, lines: &[String]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }

    let mut contents = String::with_capacity(lines.len() * 17);
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(path, contents)
        .with_context(|| format!("writing stimulus file {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = resolve_config(&args)?;
    let generator_config: &GeneratorConfig = &workflow_config.generator;

    let runner = Runner::new(workflow_config.clone());
    let payload = build_signal_payload_from_config(generator_config)?;
    let result = runner.execute(&payload)?;

    write_stimulus(&args.output, &result.lines)?;

    println!(
        "Stimulus run -> {} samples, peak {:.4}, codes [{}, {}], file {}",
        result.sample_count,
        result.peak,
        result.code_min,
        result.code_max,
        args.output.display()
    );

    let metrics = runner.metrics().snapshot();
    log::info!(
        "runs {} samples {} errors {}",
        metrics.runs,
        metrics.samples_emitted,
        metrics.errors
    );

    if args.summary {
        let record = json!({
            "output": args.output.display().to_string(),
            "sample_count": result.sample_count,
            "peak": result.peak,
            "code_min": result.code_min,
            "code_max": result.code_max,
            "word_length": workflow_config.word_length,
            "scaling": workflow_config.scaling,
            "ancillary": payload.ancillary,
            "notes": result.notes,
        });
        let report_path = PathBuf::from("tools/data/stimulus_runs.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening run log {}", report_path.display()))?;
        writeln!(file, "{}", record)?;
    }

    Ok(())
}
