use std::collections::BTreeMap;

/// Free-form per-pair fields that travel through a run untouched.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One entry of the pair-definition dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PairRecord {
    /// Key of the first entity of the pair.
    pub left: String,
    /// Key of the second entity of the pair.
    pub right: String,
    /// Every other field of the source entry.
    pub metadata: Metadata,
    /// Rounded similarity score, filled in by the merge step.
    pub score: Option<f64>,
}

impl PairRecord {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Pair definitions keyed by pair identity, annotated in place with scores.
///
/// Keys iterate in lexicographic order, so every consumer of the dataset sees
/// the same ordering for the same input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotatedDataset {
    records: BTreeMap<String, PairRecord>,
}

impl AnnotatedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the previous record stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, record: PairRecord) -> Option<PairRecord> {
        self.records.insert(key.into(), record)
    }

    pub fn get(&self, key: &str) -> Option<&PairRecord> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PairRecord> {
        self.records.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PairRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Keys of the records that have not been scored yet.
    pub fn unscored_keys(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, record)| record.score.is_none())
            .map(|(key, _)| key)
    }
}
