//! BETH feature preprocessing entrypoint.
//! Reads config from `BETH_CONFIG_PATH` (default `config.json`); optional positional
//! arguments override the input and output paths. A directory input processes every CSV in it.

use beth_features::{
    config::PreprocessConfig,
    diagnostics::TracingDiagnostics,
    error::PreprocessError,
    features::{FeaturePipeline, FeatureTransformer, TransformOptions},
    io::{discover_inputs, sha256_file},
    logging::{RunReport, StructuredLogger},
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

fn run_file(pipeline: &FeaturePipeline, run_id: &str, input: &Path, output: &Path) -> Result<(), PreprocessError> {
    let mut report = RunReport::new(run_id, input, output);
    let result = pipeline.run(input, output);
    match &result {
        Ok(outcome) => {
            report.rows = Some(outcome.rows);
            report.columns = Some(outcome.columns);
            report.output_sha256 = sha256_file(output);
        }
        Err(e) => {
            error!(input = %input.display(), kind = e.kind(), error = %e, "preprocessing failed");
            report.status = "failed";
            report.error_kind = Some(e.kind());
            report.error = Some(e.to_string());
        }
    }
    StructuredLogger::emit_json(&report, &mut std::io::stdout());
    result.map(|_| ())
}

/// Map `file` under `input_root` to the same relative path under `output_root`.
fn output_for(file: &Path, input_root: &Path, output_root: &Path) -> PathBuf {
    let rel = file.strip_prefix(input_root).unwrap_or(file);
    output_root.join(rel)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("BETH_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let mut config = PreprocessConfig::try_load(&config_path)?.unwrap_or_default();

    let mut args = std::env::args_os().skip(1);
    if let Some(input) = args.next() {
        config.input = PathBuf::from(input);
    }
    if let Some(output) = args.next() {
        config.output = PathBuf::from(output);
    }

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(input = %config.input.display(), output = %config.output.display(), "BETH preprocessing starting");

    let transformer = FeatureTransformer::new(TransformOptions::from(&config.transform));
    let mut pipeline = FeaturePipeline::new(transformer);
    if config.diagnostics.enabled {
        pipeline = pipeline.with_diagnostics(Box::new(TracingDiagnostics::new(config.diagnostics.sample_rows)));
    }

    let run_id = RunReport::new_run_id();

    if !config.input.is_dir() {
        run_file(&pipeline, &run_id, &config.input, &config.output)?;
        info!("BETH preprocessing complete");
        return Ok(());
    }

    let files = discover_inputs(&config.input);
    if files.is_empty() {
        warn!(dir = %config.input.display(), "no CSV inputs found");
    }
    let mut failed = 0usize;
    for file in &files {
        let out = output_for(file, &config.input, &config.output);
        if run_file(&pipeline, &run_id, file, &out).is_err() {
            failed += 1;
        }
    }
    info!(files = files.len(), failed, "BETH batch preprocessing complete");

    if failed > 0 {
        return Err(format!("{} of {} input file(s) failed", failed, files.len()).into());
    }
    Ok(())
}
