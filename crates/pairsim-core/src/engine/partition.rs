use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum PartitionError {
    #[error("Cannot partition work across zero workers")]
    NoWorkers,
}

impl From<PartitionError> for ConfigError {
    fn from(err: PartitionError) -> Self {
        match err {
            PartitionError::NoWorkers => ConfigError::InvalidWorkerCount(0),
        }
    }
}

/// Splits `items` into exactly `workers` contiguous chunks.
///
/// Every chunk but the last holds `len / workers` items; the last one also
/// takes the remainder. Order is preserved within and across chunks, and
/// fewer items than workers leaves the leading chunks empty.
pub fn partition<T>(items: Vec<T>, workers: usize) -> Result<Vec<Vec<T>>, PartitionError> {
    if workers == 0 {
        return Err(PartitionError::NoWorkers);
    }

    let chunk_size = items.len() / workers;
    let mut remaining = items.into_iter();
    let mut chunks = Vec::with_capacity(workers);
    for _ in 1..workers {
        chunks.push(remaining.by_ref().take(chunk_size).collect());
    }
    chunks.push(remaining.collect());
    Ok(chunks)
}
