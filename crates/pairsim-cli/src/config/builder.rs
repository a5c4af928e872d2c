use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use pairsim::engine::config::{RunConfig, RunConfigBuilder};
use std::path::PathBuf;
use tracing::debug;

/// Resolves the final run configuration: command-line values first, then the
/// configuration file, then built-in defaults.
pub fn build_config(args: &RunArgs) -> Result<RunConfig> {
    let file = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let defaults = DefaultsConfig::default();

    let required = |cli: &Option<PathBuf>, file: &Option<PathBuf>, flag: &str| {
        cli.clone().or_else(|| file.clone()).ok_or_else(|| {
            CliError::Config(format!(
                "A value for '{flag}' is required either in the config file or via CLI argument."
            ))
        })
    };

    let entities = required(&args.entities, &file.input.entities, "--entities")?;
    let pairs = required(&args.pairs, &file.input.pairs, "--pairs")?;
    let output = required(&args.output, &file.output.path, "--output")?;
    let workers = args.workers.or(file.workers).ok_or_else(|| {
        CliError::Config(
            "A value for '--workers' is required either in the config file or via CLI argument."
                .to_string(),
        )
    })?;

    let pick = |cli: &Option<String>, file: &Option<String>, default: &str| {
        cli.clone()
            .or_else(|| file.clone())
            .unwrap_or_else(|| default.to_string())
    };

    let config = RunConfigBuilder::new()
        .entity_store_path(entities)
        .pairs_path(pairs)
        .output_path(output)
        .worker_count(workers)
        .score_precision(
            args.precision
                .or(file.output.precision)
                .unwrap_or(defaults.score_precision),
        )
        .left_field(pick(
            &args.left_field,
            &file.input.left_field,
            &defaults.left_field,
        ))
        .right_field(pick(
            &args.right_field,
            &file.input.right_field,
            &defaults.right_field,
        ))
        .score_field(pick(
            &args.score_field,
            &file.output.score_field,
            &defaults.score_field,
        ))
        .fingerprint_bits(
            args.fingerprint_bits
                .or(file.fingerprint.bits)
                .unwrap_or(defaults.fingerprint_bits),
        )
        .max_path_length(
            args.max_path
                .or(file.fingerprint.max_path)
                .unwrap_or(defaults.max_path_length),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!("Final run configuration: {:?}", &config);
    Ok(config)
}
