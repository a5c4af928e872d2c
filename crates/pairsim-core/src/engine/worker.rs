use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::timing::{ComputeTiming, Stopwatch};
use crate::core::models::work_item::{Chunk, ResultRecord};
use crate::core::scoring::{Scorer, ScoringError};
use std::fmt;
use tracing::{debug, instrument};

/// Whether a worker shares its thread with the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    Coordinator,
    Participant,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerRole::Coordinator => f.write_str("coordinator"),
            WorkerRole::Participant => f.write_str("participant"),
        }
    }
}

/// Everything a worker sends back to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerReport {
    pub worker: usize,
    pub results: Vec<ResultRecord>,
    pub timing: ComputeTiming,
}

/// Scores every work item of `chunk`, in order.
///
/// The first scoring failure aborts the chunk: no partial result list is
/// returned, so the coordinator never sees an incomplete report.
#[instrument(skip_all, name = "worker", fields(worker = index, role = %role))]
pub fn run<S>(
    index: usize,
    role: WorkerRole,
    chunk: Chunk,
    scorer: &S,
    reporter: &ProgressReporter,
) -> Result<WorkerReport, EngineError>
where
    S: Scorer + ?Sized,
{
    let items = chunk.len();
    debug!(items, "Worker received its chunk.");

    let stopwatch = Stopwatch::start();
    let mut results = Vec::with_capacity(items);
    for item in chunk {
        let score = scorer
            .score(&item.left, &item.right)
            .and_then(|score| {
                if score.is_finite() {
                    Ok(score)
                } else {
                    Err(ScoringError::NonFinite(score))
                }
            })
            .map_err(|source| EngineError::Scoring {
                worker: index,
                key: item.key.clone(),
                source,
            })?;
        results.push(ResultRecord {
            key: item.key,
            score,
        });
        reporter.report(Progress::TaskIncrement);
    }
    let elapsed = stopwatch.elapsed();

    reporter.report(Progress::WorkerFinished {
        worker: index,
        items,
        elapsed,
    });
    debug!(items, elapsed_secs = elapsed.as_secs_f64(), "Worker finished its chunk.");

    Ok(WorkerReport {
        worker: index,
        results,
        timing: ComputeTiming {
            worker: index,
            role,
            items,
            elapsed,
        },
    })
}
