use crate::core::io::csv_store::CsvEntityStore;
use crate::core::io::json_pairs::{JsonPairFile, JsonResultSink};
use crate::core::io::traits::{EntityStore, ResultSink, WorkItemSource};
use crate::core::models::work_item::WorkItemRegistry;
use crate::core::scoring::Scorer;
use crate::core::scoring::tanimoto::TanimotoScorer;
use crate::engine::config::{ExecutionConfig, RunConfig};
use crate::engine::coordinator::Coordinator;
use crate::engine::error::EngineError;
use crate::engine::merge::merge_results;
use crate::engine::partition::partition;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::timing::{PhaseTimings, Stopwatch};
use tracing::{info, instrument};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub pairs_scored: usize,
    pub worker_count: usize,
    pub timings: PhaseTimings,
}

/// Runs a scoring job with the file-backed collaborators and the fingerprint
/// Tanimoto scorer described by `config`.
pub fn run(config: &RunConfig, reporter: &ProgressReporter) -> Result<RunSummary, EngineError> {
    let entity_store = CsvEntityStore::new(&config.input.entity_store_path);
    let pair_source = JsonPairFile::new(&config.input.pairs_path, config.fields.clone());
    let sink = JsonResultSink::new(&config.output_path, config.fields.clone());
    let scorer = TanimotoScorer::new(config.fingerprint);

    run_with(
        &entity_store,
        &pair_source,
        &scorer,
        &sink,
        &config.execution,
        reporter,
    )
}

/// Runs a scoring job against arbitrary collaborators.
///
/// Nothing is written to `sink` unless every pair was scored and merged.
#[instrument(skip_all, name = "score_pairs_workflow", fields(workers = execution.worker_count))]
pub fn run_with<E, W, S, R>(
    entity_store: &E,
    pair_source: &W,
    scorer: &S,
    sink: &R,
    execution: &ExecutionConfig,
    reporter: &ProgressReporter,
) -> Result<RunSummary, EngineError>
where
    E: EntityStore + ?Sized,
    W: WorkItemSource + ?Sized,
    S: Scorer + ?Sized,
    R: ResultSink + ?Sized,
{
    let total_clock = Stopwatch::start();

    // === Phase 1: Load entities and pair definitions ===
    let (mut dataset, registry) = reporter.phase("Loading Inputs", || {
        info!("Loading entities and pair definitions.");
        let entities = entity_store
            .load_entities()
            .map_err(|source| EngineError::DataLoad {
                resource: "entities",
                source,
            })?;
        let dataset = pair_source
            .load_pairs()
            .map_err(|source| EngineError::DataLoad {
                resource: "pair definitions",
                source,
            })?;
        let registry = WorkItemRegistry::build(&dataset, &entities).map_err(|source| {
            EngineError::DataLoad {
                resource: "pair definitions",
                source,
            }
        })?;
        info!(
            entities = entities.len(),
            pairs = registry.len(),
            "Inputs loaded."
        );
        Ok::<_, EngineError>((dataset, registry))
    })?;
    let pair_count = registry.len();

    // === Phase 2: Partition ===
    let chunks = partition(registry.into_items(), execution.worker_count)
        .map_err(|e| EngineError::Configuration(e.into()))?;

    // === Phase 3: Distribute, compute, collect ===
    let execution_result = reporter.phase("Scoring Pairs", || {
        reporter.report(Progress::TaskStart {
            total_steps: pair_count as u64,
        });
        let result = Coordinator::new(scorer, reporter).execute(chunks);
        reporter.report(Progress::TaskFinish);
        result
    })?;

    // === Phase 4: Merge ===
    let timings_computation: Vec<_> = execution_result
        .reports
        .iter()
        .map(|report| report.timing.clone())
        .collect();
    let results = execution_result
        .reports
        .into_iter()
        .flat_map(|report| report.results);
    let pairs_scored = reporter.phase("Merging Results", || {
        merge_results(&mut dataset, results, execution.score_precision)
    })?;

    // === Phase 5: Persist ===
    reporter.phase("Saving Results", || sink.persist(&dataset))?;

    let timings = PhaseTimings {
        distribution: execution_result.distribution,
        computation: timings_computation,
        collection: execution_result.collection,
        total: total_clock.elapsed(),
    };
    info!(
        pairs = pairs_scored,
        total_secs = timings.total.as_secs_f64(),
        "Workflow complete."
    );

    Ok(RunSummary {
        pairs_scored,
        worker_count: execution.worker_count,
        timings,
    })
}
