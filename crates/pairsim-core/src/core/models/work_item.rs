use super::dataset::AnnotatedDataset;
use super::entity::{Entity, EntityMap};
use crate::core::io::error::LoadError;
use std::sync::Arc;

/// One unit of pairwise computation, uniquely keyed within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub key: String,
    pub left: Arc<Entity>,
    pub right: Arc<Entity>,
}

/// The contiguous run of work items handed to a single worker.
pub type Chunk = Vec<WorkItem>;

/// The score computed for one work item.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub key: String,
    pub score: f64,
}

/// Ordered collection of every work item of a run.
///
/// The order is the iteration order of the dataset the registry was built
/// from, which keeps partitioning deterministic for identical inputs.
#[derive(Debug, Clone, Default)]
pub struct WorkItemRegistry {
    items: Vec<WorkItem>,
}

impl WorkItemRegistry {
    /// Resolves every pair definition of `dataset` against the loaded entities.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnknownEntity`] when a pair references a SMILES
    /// string that is absent from `entities`.
    pub fn build(dataset: &AnnotatedDataset, entities: &EntityMap) -> Result<Self, LoadError> {
        let resolve = |pair: &str, key: &str| -> Result<Arc<Entity>, LoadError> {
            entities
                .get(key)
                .cloned()
                .ok_or_else(|| LoadError::UnknownEntity {
                    pair: pair.to_string(),
                    entity: key.to_string(),
                })
        };

        let items = dataset
            .iter()
            .map(|(key, record)| {
                Ok(WorkItem {
                    key: key.to_string(),
                    left: resolve(key, &record.left)?,
                    right: resolve(key, &record.right)?,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<WorkItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::dataset::PairRecord;

    fn entity_map(smiles: &[&str]) -> EntityMap {
        smiles
            .iter()
            .map(|s| (s.to_string(), Arc::new(Entity::new(*s))))
            .collect()
    }

    #[test]
    fn build_resolves_both_sides_of_every_pair() {
        let entities = entity_map(&["CCO", "CCN", "c1ccccc1"]);
        let mut dataset = AnnotatedDataset::new();
        dataset.insert("p1", PairRecord::new("CCO", "CCN"));
        dataset.insert("p2", PairRecord::new("CCN", "c1ccccc1"));

        let registry = WorkItemRegistry::build(&dataset, &entities).unwrap();

        assert_eq!(registry.len(), 2);
        let items = registry.into_items();
        let first = &items[0];
        assert_eq!(first.key, "p1");
        assert_eq!(first.left.key(), "CCO");
        assert_eq!(first.right.key(), "CCN");
        assert!(Arc::ptr_eq(&first.right, &items[1].left));
    }

    #[test]
    fn build_rejects_pairs_that_reference_unknown_entities() {
        let entities = entity_map(&["CCO"]);
        let mut dataset = AnnotatedDataset::new();
        dataset.insert("p1", PairRecord::new("CCO", "CCCl"));

        let err = WorkItemRegistry::build(&dataset, &entities).unwrap_err();
        match err {
            LoadError::UnknownEntity { pair, entity } => {
                assert_eq!(pair, "p1");
                assert_eq!(entity, "CCCl");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_dataset_yields_empty_registry() {
        let registry = WorkItemRegistry::build(&AnnotatedDataset::new(), &EntityMap::new()).unwrap();
        assert!(registry.is_empty());
    }
}
