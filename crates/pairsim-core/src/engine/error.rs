use super::config::ConfigError;
use super::merge::MergeError;
use crate::core::io::error::{LoadError, PersistError};
use crate::core::scoring::ScoringError;
use std::fmt;
use thiserror::Error;

/// Stage of a run at which an error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Load,
    Partition,
    Distribute,
    Compute,
    Collect,
    Merge,
    Persist,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Load => "load",
            Phase::Partition => "partition",
            Phase::Distribute => "distribute",
            Phase::Compute => "compute",
            Phase::Collect => "collect",
            Phase::Merge => "merge",
            Phase::Persist => "persist",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Failed to load {resource}: {source}")]
    DataLoad {
        resource: &'static str,
        source: LoadError,
    },

    #[error("Worker {worker} failed to score pair '{key}': {source}")]
    Scoring {
        worker: usize,
        key: String,
        source: ScoringError,
    },

    #[error("Failed to start worker {worker}: {source}")]
    WorkerSpawn {
        worker: usize,
        source: std::io::Error,
    },

    #[error("Worker {worker} terminated during the {phase} phase without reporting results")]
    WorkerLost { worker: usize, phase: Phase },

    #[error("Failed to merge results: {0}")]
    Merge(#[from] MergeError),

    #[error("Failed to persist results: {0}")]
    Persistence(#[from] PersistError),
}

impl EngineError {
    pub fn phase(&self) -> Phase {
        match self {
            EngineError::Configuration(_) => Phase::Partition,
            EngineError::DataLoad { .. } => Phase::Load,
            EngineError::Scoring { .. } => Phase::Compute,
            EngineError::WorkerSpawn { .. } => Phase::Distribute,
            EngineError::WorkerLost { phase, .. } => *phase,
            EngineError::Merge(_) => Phase::Merge,
            EngineError::Persistence(_) => Phase::Persist,
        }
    }

    /// Whether the error originates from a worker rather than from the coordinator.
    pub fn is_worker_failure(&self) -> bool {
        matches!(
            self,
            EngineError::Scoring { .. }
                | EngineError::WorkerSpawn { .. }
                | EngineError::WorkerLost { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::smiles::SmilesError;

    #[test]
    fn every_error_names_its_phase() {
        let scoring = EngineError::Scoring {
            worker: 2,
            key: "p7".to_string(),
            source: ScoringError::InvalidSmiles {
                smiles: "C1".to_string(),
                source: SmilesError::UnclosedRing { label: 1 },
            },
        };
        assert_eq!(scoring.phase(), Phase::Compute);
        assert!(scoring.is_worker_failure());
        assert!(scoring.to_string().contains("Worker 2"));
        assert!(scoring.to_string().contains("'p7'"));

        let lost = EngineError::WorkerLost {
            worker: 1,
            phase: Phase::Collect,
        };
        assert_eq!(lost.phase(), Phase::Collect);
        assert!(lost.to_string().contains("collect phase"));

        let config = EngineError::from(ConfigError::InvalidWorkerCount(0));
        assert_eq!(config.phase(), Phase::Partition);
        assert!(!config.is_worker_failure());

        let merge = EngineError::from(MergeError::UnknownKey("ghost".to_string()));
        assert_eq!(merge.phase(), Phase::Merge);
    }
}
