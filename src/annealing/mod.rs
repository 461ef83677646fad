//! Annealing data: ligation-count matrices and the datasets that hold them.
//!
//! Each dataset records, for every pair of overhang sequences, how often the
//! two were observed ligated together in a one-pot Golden Gate reaction with a
//! given enzyme. High counts between an overhang and its reverse complement
//! mean strong correct pairing; non-zero counts anywhere else mean
//! misannealing.
//!
//! ## Data Directory Layout
//!
//! ```text
//! data/
//! └── 37C_1h/
//!     ├── 2020_01h_BsaI.csv
//!     ├── 2020_01h_BsmBI.csv
//!     ├── 2020_01h_Esp3I.csv.gz
//!     └── 2020_01h_BbsI.csv
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use overhang::annealing::store::{AnnealingDataStore, AnnealingMatrixProvider};
//! use overhang::annealing::registry::EnzymeRegistry;
//! use overhang::core::types::{AnnealingCondition, Enzyme};
//! use std::path::Path;
//!
//! let store = AnnealingDataStore::load_from_dir(Path::new("data")).unwrap();
//! let registry = EnzymeRegistry::default();
//! let dataset = registry.dataset_for(Enzyme::BsaI).unwrap();
//! let matrix = store.lookup(dataset, &AnnealingCondition::default()).unwrap();
//! println!("{} sequences", matrix.len());
//! ```

pub mod matrix;
pub mod registry;
pub mod store;
