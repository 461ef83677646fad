use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::types::{DatasetId, Enzyme, UnknownEnzymeError};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read enzyme map: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse enzyme map: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error(transparent)]
    UnknownEnzyme(#[from] UnknownEnzymeError),
}

/// Mapping from enzyme to the annealing dataset used to evaluate it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnzymeRegistry {
    datasets: BTreeMap<Enzyme, DatasetId>,
}

impl EnzymeRegistry {
    /// A registry with no enzymes
    #[must_use]
    pub fn empty() -> Self {
        Self {
            datasets: BTreeMap::new(),
        }
    }

    /// Parse a JSON object of enzyme name to dataset id, e.g. `{"BsaI": "2020_01h_BsaI"}`
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ParseError` for invalid JSON or
    /// `RegistryError::UnknownEnzyme` for names outside the supported enzymes.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut registry = Self::empty();
        for (name, dataset) in raw {
            registry = registry.with_dataset(name.parse()?, DatasetId::new(dataset));
        }
        Ok(registry)
    }

    /// Load a registry from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ReadError` if the file cannot be read, or any
    /// error from [`EnzymeRegistry::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    #[must_use]
    pub fn with_dataset(mut self, enzyme: Enzyme, dataset: DatasetId) -> Self {
        self.datasets.insert(enzyme, dataset);
        self
    }

    #[must_use]
    pub fn dataset_for(&self, enzyme: Enzyme) -> Option<&DatasetId> {
        self.datasets.get(&enzyme)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Enzyme, &DatasetId)> {
        self.datasets.iter()
    }
}

impl Default for EnzymeRegistry {
    /// 2020 one-hour ligation datasets (Pryor et al.)
    fn default() -> Self {
        Self::empty()
            .with_dataset(Enzyme::BsaI, DatasetId::new("2020_01h_BsaI"))
            .with_dataset(Enzyme::BsmBI, DatasetId::new("2020_01h_BsmBI"))
            .with_dataset(Enzyme::Esp3I, DatasetId::new("2020_01h_Esp3I"))
            .with_dataset(Enzyme::BbsI, DatasetId::new("2020_01h_BbsI"))
    }
}
