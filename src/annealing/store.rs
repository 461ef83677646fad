use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::annealing::matrix::AnnealingMatrix;
use crate::core::types::{AnnealingCondition, DatasetId};
use crate::parsing::matrix::{dataset_stem, is_matrix_file, parse_matrix_file, MatrixParseError};

#[derive(Error, Debug)]
pub enum AnnealingError {
    #[error("Failed to read annealing data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse annealing matrix {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: MatrixParseError,
    },

    #[error("No annealing datasets found under {0}")]
    NoDatasets(PathBuf),
}

/// Source of annealing matrices for a dataset measured under a condition.
///
/// Implementations hold immutable, preloaded data so lookups can be shared
/// across threads.
pub trait AnnealingMatrixProvider: Send + Sync {
    fn lookup(&self, dataset: &DatasetId, condition: &AnnealingCondition)
        -> Option<&AnnealingMatrix>;
}

/// In-memory collection of annealing datasets keyed by condition and dataset id
#[derive(Debug, Default)]
pub struct AnnealingDataStore {
    datasets: HashMap<(AnnealingCondition, DatasetId), AnnealingMatrix>,
}

impl AnnealingDataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a dataset
    pub fn insert(
        &mut self,
        condition: AnnealingCondition,
        dataset: DatasetId,
        matrix: AnnealingMatrix,
    ) {
        if self
            .datasets
            .insert((condition, dataset.clone()), matrix)
            .is_some()
        {
            warn!("Replaced annealing dataset {dataset} ({condition})");
        }
    }

    /// Load every matrix under `root/<T>C_<D>h/`.
    ///
    /// Directories whose names are not a condition are skipped, as are files
    /// without a `.csv`/`.tsv` (optionally `.gz`) extension. The file stem is
    /// used as the dataset id, e.g. `root/37C_1h/2020_01h_BsaI.csv`.
    ///
    /// # Errors
    ///
    /// Returns `AnnealingError::Io` if a directory cannot be read,
    /// `AnnealingError::Parse` if a matrix file is malformed, or
    /// `AnnealingError::NoDatasets` if nothing was loaded.
    pub fn load_from_dir(root: &Path) -> Result<Self, AnnealingError> {
        let mut store = Self::new();

        let mut condition_dirs: Vec<PathBuf> = std::fs::read_dir(root)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        condition_dirs.sort();

        for dir in condition_dirs {
            let dir_name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let Some(condition) = AnnealingCondition::from_dir_name(&dir_name) else {
                debug!("Skipping {}: not a condition directory", dir.display());
                continue;
            };

            let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && is_matrix_file(path))
                .collect();
            files.sort();

            for file in files {
                let Some(stem) = dataset_stem(&file) else {
                    continue;
                };
                let matrix = parse_matrix_file(&file).map_err(|source| AnnealingError::Parse {
                    path: file.clone(),
                    source,
                })?;
                debug!(
                    "Loaded {} ({} sequences) for {condition}",
                    stem,
                    matrix.len()
                );
                store.insert(condition, DatasetId::new(stem), matrix);
            }
        }

        if store.is_empty() {
            return Err(AnnealingError::NoDatasets(root.to_path_buf()));
        }
        info!(
            "Loaded {} annealing dataset(s) from {}",
            store.len(),
            root.display()
        );
        Ok(store)
    }

    /// All (condition, dataset) keys, sorted
    #[must_use]
    pub fn datasets(&self) -> Vec<(AnnealingCondition, DatasetId)> {
        let mut keys: Vec<_> = self.datasets.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of datasets in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl AnnealingMatrixProvider for AnnealingDataStore {
    fn lookup(
        &self,
        dataset: &DatasetId,
        condition: &AnnealingCondition,
    ) -> Option<&AnnealingMatrix> {
        self.datasets.get(&(*condition, dataset.clone()))
    }
}
