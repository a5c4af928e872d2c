use super::config::ConfigError;
use super::error::{EngineError, Phase};
use super::progress::{Progress, ProgressReporter};
use super::timing::Stopwatch;
use super::worker::{self, WorkerReport, WorkerRole};
use crate::core::models::work_item::Chunk;
use crate::core::scoring::Scorer;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Barrier, mpsc};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

type Outcome = Result<WorkerReport, EngineError>;

/// Reports of a completed distribute/compute/collect cycle.
#[derive(Debug)]
pub struct Execution {
    /// One report per worker, ordered by worker index.
    pub reports: Vec<WorkerReport>,
    pub distribution: Duration,
    pub collection: Duration,
}

/// Runs one chunk per worker across `chunks.len()` threads of execution.
///
/// Worker 0 is the coordinator itself and computes on the calling thread.
/// Every other worker gets a dedicated named thread that blocks until its
/// chunk arrives, then waits on the shared distribution barrier before it
/// starts scoring. Collection waits for every worker, whether it succeeded
/// or not, and only then reports the first failure in worker order.
pub struct Coordinator<'a, S: Scorer + ?Sized> {
    scorer: &'a S,
    reporter: &'a ProgressReporter<'a>,
}

impl<'a, S: Scorer + ?Sized> Coordinator<'a, S> {
    pub fn new(scorer: &'a S, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { scorer, reporter }
    }

    #[instrument(skip_all, name = "coordinator", fields(workers = chunks.len()))]
    pub fn execute(&self, chunks: Vec<Chunk>) -> Result<Execution, EngineError> {
        let worker_count = chunks.len();
        if worker_count == 0 {
            return Err(ConfigError::InvalidWorkerCount(0).into());
        }

        let barrier = Barrier::new(worker_count);
        let barrier = &barrier;
        let (result_tx, result_rx) = mpsc::channel::<(usize, Outcome)>();

        thread::scope(|scope| {
            let mut senders = Vec::with_capacity(worker_count - 1);
            let mut handles = Vec::with_capacity(worker_count - 1);

            for index in 1..worker_count {
                let (chunk_tx, chunk_rx) = mpsc::channel::<Chunk>();
                let result_tx = result_tx.clone();
                let scorer = self.scorer;
                let reporter = self.reporter;

                let spawned = thread::Builder::new()
                    .name(format!("pairsim-worker-{index}"))
                    .spawn_scoped(scope, move || {
                        let Ok(chunk) = chunk_rx.recv() else {
                            return;
                        };
                        reporter.report(Progress::ChunkReceived { worker: index });
                        barrier.wait();
                        let outcome =
                            worker::run(index, WorkerRole::Participant, chunk, scorer, reporter);
                        let _ = result_tx.send((index, outcome));
                    });

                match spawned {
                    Ok(handle) => {
                        senders.push(chunk_tx);
                        handles.push(handle);
                    }
                    Err(source) => {
                        // Participants already started see a closed channel and exit.
                        drop(senders);
                        return Err(EngineError::WorkerSpawn {
                            worker: index,
                            source,
                        });
                    }
                }
            }
            drop(result_tx);
            debug!(participants = handles.len(), "Worker threads started.");

            let distribution_clock = Stopwatch::start();
            let mut chunks = chunks.into_iter();
            let own_chunk = chunks.next().unwrap_or_default();
            let mut undelivered = Vec::new();
            for (index, (sender, chunk)) in (1..).zip(senders.into_iter().zip(chunks)) {
                if sender.send(chunk).is_err() {
                    warn!(worker = index, "Worker exited before receiving its chunk.");
                    undelivered.push(index);
                    // Stand in at the barrier so the remaining workers are released.
                    scope.spawn(move || {
                        barrier.wait();
                    });
                }
            }
            self.reporter.report(Progress::ChunkReceived { worker: 0 });
            barrier.wait();
            let distribution = distribution_clock.elapsed();
            info!(
                elapsed_secs = distribution.as_secs_f64(),
                "All chunks distributed."
            );

            let mut panicked = Vec::new();
            let own_outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                worker::run(
                    0,
                    WorkerRole::Coordinator,
                    own_chunk,
                    self.scorer,
                    self.reporter,
                )
            }));
            if own_outcome.is_err() {
                warn!(worker = 0, "Coordinator worker panicked.");
                panicked.push(0);
            }

            let collection_clock = Stopwatch::start();
            let mut outcomes: Vec<Option<Outcome>> = (0..worker_count).map(|_| None).collect();
            outcomes[0] = own_outcome.ok();
            for (index, outcome) in result_rx {
                outcomes[index] = Some(outcome);
            }

            for (index, handle) in (1..).zip(handles) {
                if handle.join().is_err() {
                    warn!(worker = index, "Worker thread panicked.");
                    panicked.push(index);
                }
            }
            let collection = collection_clock.elapsed();
            info!(
                elapsed_secs = collection.as_secs_f64(),
                "All worker reports collected."
            );

            let mut reports = Vec::with_capacity(worker_count);
            for (index, outcome) in outcomes.into_iter().enumerate() {
                match outcome {
                    Some(Ok(report)) => reports.push(report),
                    Some(Err(err)) => return Err(err),
                    None => {
                        let phase = if undelivered.contains(&index) {
                            Phase::Distribute
                        } else if panicked.contains(&index) {
                            Phase::Compute
                        } else {
                            Phase::Collect
                        };
                        return Err(EngineError::WorkerLost {
                            worker: index,
                            phase,
                        });
                    }
                }
            }

            Ok(Execution {
                reports,
                distribution,
                collection,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::entity::{Entity, EntityMap};
    use crate::core::models::work_item::WorkItem;
    use crate::core::scoring::ScoringError;
    use crate::engine::partition::partition;
    use std::collections::{BTreeSet, HashSet};
    use std::sync::{Arc, Mutex};

    fn items(count: usize) -> Vec<WorkItem> {
        let mut entities = EntityMap::new();
        (0..count)
            .map(|i| {
                let smiles = "C".repeat(i % 5 + 1);
                let entity = entities
                    .entry(smiles.clone())
                    .or_insert_with(|| Arc::new(Entity::new(smiles)))
                    .clone();
                WorkItem {
                    key: format!("p{i:03}"),
                    left: entity.clone(),
                    right: entity,
                }
            })
            .collect()
    }

    fn constant(_: &Entity, _: &Entity) -> Result<f64, ScoringError> {
        Ok(0.5)
    }

    #[test]
    fn every_item_is_scored_exactly_once() {
        let reporter = ProgressReporter::new();
        let coordinator = Coordinator::new(&constant, &reporter);
        let chunks = partition(items(17), 4).unwrap();

        let execution = coordinator.execute(chunks).unwrap();

        assert_eq!(execution.reports.len(), 4);
        let workers: Vec<_> = execution.reports.iter().map(|r| r.worker).collect();
        assert_eq!(workers, vec![0, 1, 2, 3]);
        assert_eq!(execution.reports[0].timing.role, WorkerRole::Coordinator);
        assert!(
            execution.reports[1..]
                .iter()
                .all(|r| r.timing.role == WorkerRole::Participant)
        );

        let keys: Vec<_> = execution
            .reports
            .iter()
            .flat_map(|r| r.results.iter().map(|record| record.key.clone()))
            .collect();
        let unique: BTreeSet<_> = keys.iter().cloned().collect();
        assert_eq!(keys.len(), 17);
        assert_eq!(unique.len(), 17);
    }

    #[test]
    fn single_worker_runs_on_the_calling_thread() {
        let caller = thread::current().id();
        let seen = Mutex::new(HashSet::new());
        let scorer = |_: &Entity, _: &Entity| -> Result<f64, ScoringError> {
            seen.lock().unwrap().insert(thread::current().id());
            Ok(1.0)
        };
        let reporter = ProgressReporter::new();

        let execution = Coordinator::new(&scorer, &reporter)
            .execute(partition(items(5), 1).unwrap())
            .unwrap();

        assert_eq!(execution.reports.len(), 1);
        assert_eq!(execution.reports[0].results.len(), 5);
        assert_eq!(*seen.lock().unwrap(), HashSet::from([caller]));
    }

    #[test]
    fn participants_run_on_named_threads() {
        let names = Mutex::new(BTreeSet::new());
        let scorer = |_: &Entity, _: &Entity| -> Result<f64, ScoringError> {
            if let Some(name) = thread::current().name() {
                names.lock().unwrap().insert(name.to_string());
            }
            Ok(0.0)
        };
        let reporter = ProgressReporter::new();

        Coordinator::new(&scorer, &reporter)
            .execute(partition(items(6), 3).unwrap())
            .unwrap();

        let names = names.into_inner().unwrap();
        assert!(names.contains("pairsim-worker-1"));
        assert!(names.contains("pairsim-worker-2"));
    }

    #[test]
    fn more_workers_than_items_leaves_empty_chunks() {
        let reporter = ProgressReporter::new();
        let execution = Coordinator::new(&constant, &reporter)
            .execute(partition(items(2), 5).unwrap())
            .unwrap();

        assert_eq!(execution.reports.len(), 5);
        let total: usize = execution.reports.iter().map(|r| r.results.len()).sum();
        assert_eq!(total, 2);
        assert!(execution.reports.iter().any(|r| r.results.is_empty()));
    }

    #[test]
    fn zero_chunks_is_a_configuration_error() {
        let reporter = ProgressReporter::new();
        let err = Coordinator::new(&constant, &reporter)
            .execute(Vec::new())
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Configuration(ConfigError::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn scorer_failure_in_a_participant_fails_the_run() {
        let scorer = |left: &Entity, _: &Entity| -> Result<f64, ScoringError> {
            if left.smiles() == "CCC" {
                Err(ScoringError::Failed("refused".to_string()))
            } else {
                Ok(0.25)
            }
        };
        let reporter = ProgressReporter::new();
        let chunks = partition(items(8), 2).unwrap();

        let err = Coordinator::new(&scorer, &reporter)
            .execute(chunks)
            .unwrap_err();

        assert!(err.is_worker_failure());
        assert!(matches!(err, EngineError::Scoring { .. }));
    }

    #[test]
    fn panicking_participant_is_reported_as_lost() {
        let scorer = |_: &Entity, _: &Entity| -> Result<f64, ScoringError> {
            if thread::current().name() == Some("pairsim-worker-1") {
                panic!("scorer blew up");
            }
            Ok(0.75)
        };
        let reporter = ProgressReporter::new();

        let err = Coordinator::new(&scorer, &reporter)
            .execute(partition(items(4), 2).unwrap())
            .unwrap_err();

        match err {
            EngineError::WorkerLost { worker, phase } => {
                assert_eq!(worker, 1);
                assert_eq!(phase, Phase::Compute);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn panicking_coordinator_worker_is_reported_as_lost() {
        let scorer = |_: &Entity, _: &Entity| -> Result<f64, ScoringError> {
            let on_participant = thread::current()
                .name()
                .is_some_and(|name| name.starts_with("pairsim-worker-"));
            if !on_participant {
                panic!("scorer blew up on the calling thread");
            }
            Ok(0.75)
        };
        let reporter = ProgressReporter::new();

        let err = Coordinator::new(&scorer, &reporter)
            .execute(partition(items(4), 2).unwrap())
            .unwrap_err();

        assert!(err.is_worker_failure());
        match err {
            EngineError::WorkerLost { worker, phase } => {
                assert_eq!(worker, 0);
                assert_eq!(phase, Phase::Compute);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn every_chunk_is_delivered_before_any_pair_is_scored() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter =
            ProgressReporter::with_callback(Box::new(move |e| sink.lock().unwrap().push(e)));

        Coordinator::new(&constant, &reporter)
            .execute(partition(items(12), 4).unwrap())
            .unwrap();

        let events = events.lock().unwrap();
        let first_increment = events
            .iter()
            .position(|e| matches!(e, Progress::TaskIncrement))
            .unwrap();
        let received: BTreeSet<usize> = events[..first_increment]
            .iter()
            .filter_map(|e| match e {
                Progress::ChunkReceived { worker } => Some(*worker),
                _ => None,
            })
            .collect();
        assert_eq!(received, BTreeSet::from([0, 1, 2, 3]));
    }
}
