use super::error::LoadError;
use super::traits::EntityStore;
use crate::core::models::entity::{Entity, EntityMap};
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EntityRow {
    smiles: String,
    #[serde(default)]
    name: Option<String>,
}

/// Entity store backed by a CSV file with a `smiles` column and an optional
/// `name` column. Extra columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvEntityStore {
    path: PathBuf,
}

impl CsvEntityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

impl EntityStore for CsvEntityStore {
    fn load_entities(&self) -> Result<EntityMap, LoadError> {
        debug!("Loading entities from {:?}", &self.path);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| LoadError::Csv {
                path: self.path_string(),
                source: e,
            })?;

        let mut entities = EntityMap::new();
        for (index, result) in reader.deserialize::<EntityRow>().enumerate() {
            let row = result.map_err(|e| LoadError::Csv {
                path: self.path_string(),
                source: e,
            })?;

            if row.smiles.is_empty() {
                return Err(LoadError::MalformedRecord {
                    path: self.path_string(),
                    record: format!("row {}", index + 1),
                    reason: "empty SMILES".to_string(),
                });
            }

            let entity = match row.name {
                Some(name) => Entity::new(row.smiles.clone()).with_name(name),
                None => Entity::new(row.smiles.clone()),
            };

            match entities.entry(row.smiles) {
                Entry::Occupied(slot) => {
                    return Err(LoadError::DuplicateEntity {
                        path: self.path_string(),
                        smiles: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(entity));
                }
            }
        }

        debug!(count = entities.len(), "Entities loaded.");
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_entities_with_and_without_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entities.csv");
        fs::write(&path, "smiles,name\nCCO,ethanol\n c1ccccc1 ,\n").unwrap();

        let entities = CsvEntityStore::new(&path).load_entities().unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities["CCO"].name(), Some("ethanol"));
        assert_eq!(entities["c1ccccc1"].name(), None);
    }

    #[test]
    fn name_column_is_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entities.csv");
        fs::write(&path, "smiles\nCCO\nCCN\n").unwrap();

        let entities = CsvEntityStore::new(&path).load_entities().unwrap();
        assert_eq!(entities.len(), 2);
        assert!(entities.contains_key("CCN"));
    }

    #[test]
    fn missing_file_is_reported_as_csv_error() {
        let dir = tempdir().unwrap();
        let store = CsvEntityStore::new(dir.path().join("absent.csv"));
        assert!(matches!(store.load_entities(), Err(LoadError::Csv { .. })));
    }

    #[test]
    fn missing_smiles_column_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entities.csv");
        fs::write(&path, "name\nethanol\n").unwrap();

        let result = CsvEntityStore::new(&path).load_entities();
        assert!(matches!(result, Err(LoadError::Csv { .. })));
    }

    #[test]
    fn duplicate_smiles_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entities.csv");
        fs::write(&path, "smiles,name\nCCO,a\nCCO,b\n").unwrap();

        let result = CsvEntityStore::new(&path).load_entities();
        match result {
            Err(LoadError::DuplicateEntity { smiles, .. }) => assert_eq!(smiles, "CCO"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_smiles_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entities.csv");
        fs::write(&path, "smiles,name\n,nothing\n").unwrap();

        let result = CsvEntityStore::new(&path).load_entities();
        assert!(matches!(result, Err(LoadError::MalformedRecord { .. })));
    }
}
