use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Malformed record '{record}' in '{path}': {reason}")]
    MalformedRecord {
        path: String,
        record: String,
        reason: String,
    },
    #[error("Entity '{smiles}' is defined more than once in '{path}'")]
    DuplicateEntity { path: String, smiles: String },
    #[error("Pair '{pair}' references unknown entity '{entity}'")]
    UnknownEntity { pair: String, entity: String },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON serialization error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to move results into place at '{path}': {source}")]
    Rename {
        path: String,
        source: tempfile::PersistError,
    },
    #[error("Pair '{key}' has no score to write")]
    Unscored { key: String },
    #[error("Pair '{key}' has a non-finite score ({score})")]
    NonFiniteScore { key: String, score: f64 },
}
