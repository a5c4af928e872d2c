use pairsim::core::io::json_pairs::{DEFAULT_LEFT_FIELD, DEFAULT_RIGHT_FIELD, DEFAULT_SCORE_FIELD};
use pairsim::core::scoring::fingerprint::FingerprintParams;
use pairsim::engine::config::DEFAULT_SCORE_PRECISION;

pub struct DefaultsConfig {
    pub score_precision: u32,
    pub score_field: String,
    pub left_field: String,
    pub right_field: String,
    pub fingerprint_bits: usize,
    pub max_path_length: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let fingerprint = FingerprintParams::default();
        Self {
            score_precision: DEFAULT_SCORE_PRECISION,
            score_field: DEFAULT_SCORE_FIELD.to_string(),
            left_field: DEFAULT_LEFT_FIELD.to_string(),
            right_field: DEFAULT_RIGHT_FIELD.to_string(),
            fingerprint_bits: fingerprint.num_bits,
            max_path_length: fingerprint.max_path_length,
        }
    }
}
