use std::collections::HashMap;
use std::sync::Arc;

/// A molecule as seen by the scoring pipeline.
///
/// The canonical key of an entity is its SMILES string; the optional name is
/// carried along for diagnostics only. Entities are never mutated after they
/// are loaded and are shared between workers through [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    smiles: String,
    name: Option<String>,
}

impl Entity {
    pub fn new(smiles: impl Into<String>) -> Self {
        Self {
            smiles: smiles.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.smiles
    }

    #[inline]
    pub fn smiles(&self) -> &str {
        &self.smiles
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Entities indexed by their canonical key.
pub type EntityMap = HashMap<String, Arc<Entity>>;
