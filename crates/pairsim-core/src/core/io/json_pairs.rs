use super::error::{LoadError, PersistError};
use super::traits::{ResultSink, WorkItemSource};
use crate::core::models::dataset::{AnnotatedDataset, Metadata, PairRecord};
use serde_json::Value;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_LEFT_FIELD: &str = "smi1";
pub const DEFAULT_RIGHT_FIELD: &str = "smi2";
pub const DEFAULT_SCORE_FIELD: &str = "score";

/// Names of the JSON fields that carry the pair members and the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFieldNames {
    pub left: String,
    pub right: String,
    pub score: String,
}

impl Default for PairFieldNames {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT_FIELD.to_string(),
            right: DEFAULT_RIGHT_FIELD.to_string(),
            score: DEFAULT_SCORE_FIELD.to_string(),
        }
    }
}

/// Pair definitions stored as a JSON object of objects:
///
/// ```json
/// { "p1": { "smi1": "CCO", "smi2": "CCN", "series": "A" } }
/// ```
#[derive(Debug, Clone)]
pub struct JsonPairFile {
    path: PathBuf,
    fields: PairFieldNames,
}

impl JsonPairFile {
    pub fn new(path: impl Into<PathBuf>, fields: PairFieldNames) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn malformed(&self, record: &str, reason: String) -> LoadError {
        LoadError::MalformedRecord {
            path: self.path_string(),
            record: record.to_string(),
            reason,
        }
    }

    fn take_entity_key(
        &self,
        record: &str,
        fields: &mut Metadata,
        name: &str,
    ) -> Result<String, LoadError> {
        match fields.remove(name) {
            Some(Value::String(key)) if !key.is_empty() => Ok(key),
            Some(Value::String(_)) => Err(self.malformed(record, format!("field '{name}' is empty"))),
            Some(other) => Err(self.malformed(
                record,
                format!("field '{name}' must be a string, found {other}"),
            )),
            None => Err(self.malformed(record, format!("missing field '{name}'"))),
        }
    }
}

impl WorkItemSource for JsonPairFile {
    fn load_pairs(&self) -> Result<AnnotatedDataset, LoadError> {
        debug!("Loading pair definitions from {:?}", &self.path);
        let content = std::fs::read_to_string(&self.path).map_err(|e| LoadError::Io {
            path: self.path_string(),
            source: e,
        })?;
        let entries: Metadata = serde_json::from_str(&content).map_err(|e| LoadError::Json {
            path: self.path_string(),
            source: e,
        })?;

        let mut dataset = AnnotatedDataset::new();
        for (key, value) in entries {
            let Value::Object(mut fields) = value else {
                return Err(self.malformed(&key, "entry must be a JSON object".to_string()));
            };
            let left = self.take_entity_key(&key, &mut fields, &self.fields.left)?;
            let right = self.take_entity_key(&key, &mut fields, &self.fields.right)?;
            dataset.insert(key, PairRecord::new(left, right).with_metadata(fields));
        }

        debug!(count = dataset.len(), "Pair definitions loaded.");
        Ok(dataset)
    }
}

/// Writes the annotated dataset back in the layout read by [`JsonPairFile`],
/// with the score added to every entry.
///
/// The document is first written to a temporary file next to the destination
/// and then renamed over it, so a failed write leaves any existing file intact.
#[derive(Debug, Clone)]
pub struct JsonResultSink {
    path: PathBuf,
    fields: PairFieldNames,
}

impl JsonResultSink {
    pub fn new(path: impl Into<PathBuf>, fields: PairFieldNames) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn to_document(&self, dataset: &AnnotatedDataset) -> Result<Metadata, PersistError> {
        let mut document = Metadata::new();
        for (key, record) in dataset.iter() {
            let score = record.score.ok_or_else(|| PersistError::Unscored {
                key: key.to_string(),
            })?;
            let number =
                serde_json::Number::from_f64(score).ok_or_else(|| PersistError::NonFiniteScore {
                    key: key.to_string(),
                    score,
                })?;

            let mut fields = record.metadata.clone();
            fields.insert(self.fields.left.clone(), Value::String(record.left.clone()));
            fields.insert(self.fields.right.clone(), Value::String(record.right.clone()));
            fields.insert(self.fields.score.clone(), Value::Number(number));
            document.insert(key.to_string(), Value::Object(fields));
        }
        Ok(document)
    }
}

impl ResultSink for JsonResultSink {
    fn persist(&self, dataset: &AnnotatedDataset) -> Result<(), PersistError> {
        let document = self.to_document(dataset)?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_error = |e: std::io::Error| PersistError::Io {
            path: self.path_string(),
            source: e,
        };

        let mut staging = tempfile::NamedTempFile::new_in(directory).map_err(io_error)?;
        {
            let mut writer = BufWriter::new(staging.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, &document).map_err(|e| {
                PersistError::Json {
                    path: self.path_string(),
                    source: e,
                }
            })?;
            writer.write_all(b"\n").map_err(io_error)?;
            writer.flush().map_err(io_error)?;
        }

        staging
            .persist(&self.path)
            .map_err(|e| PersistError::Rename {
                path: self.path_string(),
                source: e,
            })?;

        debug!(count = dataset.len(), "Annotated dataset written to {:?}", &self.path);
        Ok(())
    }
}
