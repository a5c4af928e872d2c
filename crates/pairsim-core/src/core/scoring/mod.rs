//! Pairwise similarity scoring.
//!
//! The engine only sees the [`Scorer`] trait. [`tanimoto::TanimotoScorer`] is the
//! implementation shipped with the library: it derives a hashed linear-path
//! [`fingerprint`] from each molecule's SMILES string and compares the two bit
//! vectors with the Tanimoto coefficient.

pub mod fingerprint;
pub mod smiles;
pub mod tanimoto;

use crate::core::models::entity::Entity;
use smiles::SmilesError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Invalid SMILES '{smiles}': {source}")]
    InvalidSmiles { smiles: String, source: SmilesError },
    #[error("Scorer produced a non-finite value ({0})")]
    NonFinite(f64),
    #[error("{0}")]
    Failed(String),
}

/// Computes a similarity score for a pair of entities.
///
/// Implementations must be deterministic: scoring the same pair twice yields
/// the same value. A single scorer is shared by every worker of a run.
pub trait Scorer: Send + Sync {
    fn score(&self, left: &Entity, right: &Entity) -> Result<f64, ScoringError>;
}

impl<F> Scorer for F
where
    F: Fn(&Entity, &Entity) -> Result<f64, ScoringError> + Send + Sync,
{
    fn score(&self, left: &Entity, right: &Entity) -> Result<f64, ScoringError> {
        (self)(left, right)
    }
}
