use crate::cli::RunArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pairsim::engine::progress::ProgressReporter;
use pairsim::engine::worker::WorkerRole;
use pairsim::workflows::score_pairs::{self, RunSummary};
use std::path::Path;
use tracing::info;

pub async fn run(args: RunArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Invoking the scoring workflow with {} worker(s)...",
        config.execution.worker_count
    );
    let summary =
        tokio::task::block_in_place(|| score_pairs::run(&config, &reporter))?;

    info!("Workflow finished, {} pair(s) scored.", summary.pairs_scored);
    print!("{}", timing_report(&summary, &config.output_path));
    Ok(())
}

/// Human-readable phase timings, one line per phase and per worker.
fn timing_report(summary: &RunSummary, output: &Path) -> String {
    let timings = &summary.timings;
    let mut lines = Vec::with_capacity(timings.computation.len() + 4);

    lines.push(format!(
        "Time to distribute data: {:.4} seconds",
        timings.distribution.as_secs_f64()
    ));
    for compute in &timings.computation {
        let label = match compute.role {
            WorkerRole::Coordinator => format!("Worker {} (coordinator)", compute.worker),
            WorkerRole::Participant => format!("Worker {}", compute.worker),
        };
        let average = match compute.average_per_item() {
            Some(average) => format!("{:.4} seconds", average.as_secs_f64()),
            None => "n/a (no pairs)".to_string(),
        };
        lines.push(format!("{label}: average time per calculation: {average}"));
    }
    lines.push(format!(
        "Time to collect results: {:.4} seconds",
        timings.collection.as_secs_f64()
    ));
    lines.push(format!("File saved as: {}", output.display()));
    lines.push(format!("Total time: {:.4} seconds", timings.total.as_secs_f64()));

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairsim::engine::timing::{ComputeTiming, PhaseTimings};
    use std::time::Duration;

    #[test]
    fn timing_report_lists_every_phase_and_worker() {
        let summary = RunSummary {
            pairs_scored: 4,
            worker_count: 2,
            timings: PhaseTimings {
                distribution: Duration::from_millis(1),
                computation: vec![
                    ComputeTiming {
                        worker: 0,
                        role: WorkerRole::Coordinator,
                        items: 0,
                        elapsed: Duration::ZERO,
                    },
                    ComputeTiming {
                        worker: 1,
                        role: WorkerRole::Participant,
                        items: 4,
                        elapsed: Duration::from_millis(2),
                    },
                ],
                collection: Duration::from_millis(3),
                total: Duration::from_millis(25),
            },
        };

        let report = timing_report(&summary, Path::new("out.json"));
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Time to distribute data: 0.0010 seconds",
                "Worker 0 (coordinator): average time per calculation: n/a (no pairs)",
                "Worker 1: average time per calculation: 0.0005 seconds",
                "Time to collect results: 0.0030 seconds",
                "File saved as: out.json",
                "Total time: 0.0250 seconds",
            ]
        );
        assert!(report.ends_with("seconds\n"));
    }
}
