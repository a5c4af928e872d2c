use pairsim::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

pub const EXIT_UNCLASSIFIED: i32 = 1;
pub const EXIT_CONFIGURATION: i32 = 2;
pub const EXIT_DATA_LOAD: i32 = 3;
pub const EXIT_WORKER_FAILURE: i32 = 4;
pub const EXIT_MERGE: i32 = 5;
pub const EXIT_PERSISTENCE: i32 = 6;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(err) => match err {
                EngineError::Configuration(_) => EXIT_CONFIGURATION,
                EngineError::DataLoad { .. } => EXIT_DATA_LOAD,
                EngineError::Merge(_) => EXIT_MERGE,
                EngineError::Persistence(_) => EXIT_PERSISTENCE,
                e if e.is_worker_failure() => EXIT_WORKER_FAILURE,
                _ => EXIT_UNCLASSIFIED,
            },
            CliError::Config(_) | CliError::FileParsing { .. } => EXIT_CONFIGURATION,
            CliError::Io(_) | CliError::Other(_) => EXIT_UNCLASSIFIED,
        }
    }

    /// User-facing description; engine errors name the phase that failed.
    pub fn report(&self) -> String {
        match self {
            CliError::Core(err) => format!("Error during {} phase: {}", err.phase(), err),
            other => format!("Error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairsim::core::io::error::LoadError;
    use pairsim::core::scoring::ScoringError;
    use pairsim::engine::config::ConfigError;
    use pairsim::engine::error::Phase;
    use pairsim::engine::merge::MergeError;

    #[test]
    fn engine_errors_map_to_distinct_exit_codes() {
        let cases = [
            (
                EngineError::from(ConfigError::InvalidWorkerCount(0)),
                EXIT_CONFIGURATION,
            ),
            (
                EngineError::DataLoad {
                    resource: "pair definitions",
                    source: LoadError::UnknownEntity {
                        pair: "p1".to_string(),
                        entity: "CCO".to_string(),
                    },
                },
                EXIT_DATA_LOAD,
            ),
            (
                EngineError::Scoring {
                    worker: 1,
                    key: "p1".to_string(),
                    source: ScoringError::Failed("boom".to_string()),
                },
                EXIT_WORKER_FAILURE,
            ),
            (
                EngineError::WorkerLost {
                    worker: 2,
                    phase: Phase::Compute,
                },
                EXIT_WORKER_FAILURE,
            ),
            (
                EngineError::from(MergeError::UnknownKey("p9".to_string())),
                EXIT_MERGE,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(CliError::from(err).exit_code(), expected);
        }
    }

    #[test]
    fn report_names_the_failed_phase() {
        let lost = CliError::from(EngineError::WorkerLost {
            worker: 1,
            phase: Phase::Compute,
        });
        assert_eq!(
            lost.report(),
            "Error during compute phase: Worker 1 terminated during the compute phase without reporting results"
        );

        let config = CliError::from(EngineError::from(ConfigError::InvalidWorkerCount(0)));
        assert!(config.report().starts_with("Error during partition phase: "));

        assert_eq!(
            CliError::Config("missing --pairs".to_string()).report(),
            "Error: Configuration error: missing --pairs"
        );
    }

    #[test]
    fn cli_level_errors_have_their_own_codes() {
        assert_eq!(
            CliError::Config("missing".to_string()).exit_code(),
            EXIT_CONFIGURATION
        );
        assert_eq!(
            CliError::FileParsing {
                path: PathBuf::from("cfg.toml"),
                source: anyhow::anyhow!("bad toml"),
            }
            .exit_code(),
            EXIT_CONFIGURATION
        );
        let io = std::io::Error::other("disk");
        assert_eq!(CliError::from(io).exit_code(), EXIT_UNCLASSIFIED);
    }
}
