use crate::core::io::json_pairs::PairFieldNames;
use crate::core::scoring::fingerprint::FingerprintParams;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SCORE_PRECISION: u32 = 3;
/// Largest number of decimal digits an `f64` score can meaningfully keep.
pub const MAX_SCORE_PRECISION: u32 = 15;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub entity_store_path: PathBuf,
    pub pairs_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    pub worker_count: usize,
    /// Decimal digits kept when a score is merged into the dataset.
    pub score_precision: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: InputConfig,
    pub output_path: PathBuf,
    pub fields: PairFieldNames,
    pub fingerprint: FingerprintParams,
    pub execution: ExecutionConfig,
}

#[derive(Default)]
pub struct RunConfigBuilder {
    entity_store_path: Option<PathBuf>,
    pairs_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    worker_count: Option<usize>,
    score_precision: Option<u32>,
    left_field: Option<String>,
    right_field: Option<String>,
    score_field: Option<String>,
    fingerprint_bits: Option<usize>,
    max_path_length: Option<usize>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_store_path(mut self, path: PathBuf) -> Self {
        self.entity_store_path = Some(path);
        self
    }
    pub fn pairs_path(mut self, path: PathBuf) -> Self {
        self.pairs_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn worker_count(mut self, count: usize) -> Self {
        self.worker_count = Some(count);
        self
    }
    pub fn score_precision(mut self, digits: u32) -> Self {
        self.score_precision = Some(digits);
        self
    }
    pub fn left_field(mut self, name: String) -> Self {
        self.left_field = Some(name);
        self
    }
    pub fn right_field(mut self, name: String) -> Self {
        self.right_field = Some(name);
        self
    }
    pub fn score_field(mut self, name: String) -> Self {
        self.score_field = Some(name);
        self
    }
    pub fn fingerprint_bits(mut self, bits: usize) -> Self {
        self.fingerprint_bits = Some(bits);
        self
    }
    pub fn max_path_length(mut self, length: usize) -> Self {
        self.max_path_length = Some(length);
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let input = InputConfig {
            entity_store_path: self
                .entity_store_path
                .ok_or(ConfigError::MissingParameter("entity_store_path"))?,
            pairs_path: self
                .pairs_path
                .ok_or(ConfigError::MissingParameter("pairs_path"))?,
        };
        let output_path = self
            .output_path
            .ok_or(ConfigError::MissingParameter("output_path"))?;

        let worker_count = self
            .worker_count
            .ok_or(ConfigError::MissingParameter("worker_count"))?;
        if worker_count == 0 {
            return Err(ConfigError::InvalidWorkerCount(worker_count));
        }

        let score_precision = self.score_precision.unwrap_or(DEFAULT_SCORE_PRECISION);
        if score_precision > MAX_SCORE_PRECISION {
            return Err(ConfigError::InvalidValue {
                parameter: "score_precision",
                reason: format!("must not exceed {MAX_SCORE_PRECISION} digits"),
            });
        }

        let defaults = PairFieldNames::default();
        let fields = PairFieldNames {
            left: self.left_field.unwrap_or(defaults.left),
            right: self.right_field.unwrap_or(defaults.right),
            score: self.score_field.unwrap_or(defaults.score),
        };
        validate_fields(&fields)?;

        let fingerprint_defaults = FingerprintParams::default();
        let fingerprint = FingerprintParams {
            num_bits: self.fingerprint_bits.unwrap_or(fingerprint_defaults.num_bits),
            max_path_length: self
                .max_path_length
                .unwrap_or(fingerprint_defaults.max_path_length),
        };
        if fingerprint.num_bits == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "fingerprint_bits",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(RunConfig {
            input,
            output_path,
            fields,
            fingerprint,
            execution: ExecutionConfig {
                worker_count,
                score_precision,
            },
        })
    }
}

fn validate_fields(fields: &PairFieldNames) -> Result<(), ConfigError> {
    for (parameter, name) in [
        ("left_field", &fields.left),
        ("right_field", &fields.right),
        ("score_field", &fields.score),
    ] {
        if name.is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter,
                reason: "field name must not be empty".to_string(),
            });
        }
    }
    if fields.left == fields.right || fields.score == fields.left || fields.score == fields.right
    {
        return Err(ConfigError::InvalidValue {
            parameter: "score_field",
            reason: "left, right, and score fields must be distinct".to_string(),
        });
    }
    Ok(())
}
