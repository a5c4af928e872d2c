use crate::core::models::dataset::AnnotatedDataset;
use crate::core::models::work_item::ResultRecord;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MergeError {
    #[error("Result for pair '{0}' has no matching dataset entry")]
    UnknownKey(String),
    #[error("Pair '{0}' received more than one result")]
    DuplicateResult(String),
    #[error("{missing} pair(s) received no result, first missing: '{first}'")]
    MissingResults { missing: usize, first: String },
}

/// Rounds `score` to `precision` decimal digits, halves away from zero.
pub fn round_score(score: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (score * factor).round() / factor
}

/// Writes every result into the dataset entry with the same key.
///
/// The merge is complete only when each entry of the dataset has received
/// exactly one result; anything else means the partition/collect cycle lost
/// or duplicated work and is reported as a [`MergeError`].
pub fn merge_results<I>(
    dataset: &mut AnnotatedDataset,
    results: I,
    precision: u32,
) -> Result<usize, MergeError>
where
    I: IntoIterator<Item = ResultRecord>,
{
    let mut merged = 0;
    for ResultRecord { key, score } in results {
        let Some(record) = dataset.get_mut(&key) else {
            return Err(MergeError::UnknownKey(key));
        };
        if record.score.is_some() {
            return Err(MergeError::DuplicateResult(key));
        }
        record.score = Some(round_score(score, precision));
        merged += 1;
    }

    let mut unscored = dataset.unscored_keys();
    if let Some(first) = unscored.next() {
        return Err(MergeError::MissingResults {
            missing: 1 + unscored.count(),
            first: first.to_string(),
        });
    }

    debug!(merged, "Results merged into dataset.");
    Ok(merged)
}
