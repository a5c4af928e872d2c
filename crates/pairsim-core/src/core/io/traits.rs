use super::error::{LoadError, PersistError};
use crate::core::models::dataset::AnnotatedDataset;
use crate::core::models::entity::EntityMap;

/// Source of the molecules referenced by pair definitions.
pub trait EntityStore {
    /// Loads every entity, keyed by its canonical SMILES string.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing resource is missing or malformed.
    fn load_entities(&self) -> Result<EntityMap, LoadError>;
}

/// Source of the pair definitions that make up a run.
pub trait WorkItemSource {
    /// Loads the pair definitions as an unscored dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing resource is missing or malformed.
    fn load_pairs(&self) -> Result<AnnotatedDataset, LoadError>;
}

/// Destination of the annotated dataset.
pub trait ResultSink {
    /// Writes the fully annotated dataset.
    ///
    /// Implementors must not leave a partially written artifact behind when
    /// this returns an error.
    fn persist(&self, dataset: &AnnotatedDataset) -> Result<(), PersistError>;
}
