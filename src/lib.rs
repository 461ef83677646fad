//! # overhang
//!
//! A library for checking Golden Gate overhang sets before building an assembly.
//!
//! In a one-pot Golden Gate reaction every fragment junction is directed by a
//! short single-stranded overhang. An assembly only works if each overhang
//! pairs with its intended partner and nothing else, which depends both on the
//! sequences themselves and on the enzyme used.
//!
//! `overhang` evaluates a candidate set against published ligation-frequency
//! data and reports what would go wrong.
//!
//! ## Features
//!
//! - **Structural checks**: duplicates, palindromes, reverse-complement collisions
//! - **Annealing checks**: weak Watson-Crick pairing, self-misannealing, misannealing pairs
//! - **Set size check**: fidelity ceilings for 3-nt and 4-nt overhangs
//! - **Compatible subset**: the largest group of overhangs free of misannealing
//! - **Compendium**: every canonical overhang of a length, with codon and repeat flags
//!
//! ## Example
//!
//! ```rust,no_run
//! use overhang::{AnnealingDataStore, CompatibilityEvaluator, Enzyme, EnzymeRegistry, EvaluatorConfig};
//! use std::path::Path;
//!
//! // Load ligation-frequency matrices once
//! let store = AnnealingDataStore::load_from_dir(Path::new("data")).unwrap();
//!
//! let evaluator =
//!     CompatibilityEvaluator::new(&store, EnzymeRegistry::default(), EvaluatorConfig::default());
//! let diagnostics = evaluator
//!     .evaluate(&["CTAT", "GTAC", "GGAC", "TCGA", "TGTT"], Enzyme::Esp3I)
//!     .unwrap();
//!
//! for message in diagnostics.error_messages().iter().chain(&diagnostics.warning_messages()) {
//!     println!("{message}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequence operations, overhang records and shared types
//! - [`annealing`]: Annealing matrices, dataset storage and the enzyme registry
//! - [`parsing`]: Parsers for annealing matrix and overhang list files
//! - [`evaluation`]: The compatibility evaluator and compatible-subset search
//! - [`report`]: Text, JSON and TSV renderings of evaluation results
//! - [`cli`]: Command-line interface implementation

pub mod annealing;
pub mod cli;
pub mod core;
pub mod evaluation;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use annealing::matrix::AnnealingMatrix;
pub use annealing::registry::EnzymeRegistry;
pub use annealing::store::{AnnealingDataStore, AnnealingMatrixProvider};
pub use core::overhang::OverhangRecord;
pub use core::types::*;
pub use evaluation::clique::find_compatible_subset;
pub use evaluation::diagnostics::OverhangSetDiagnostics;
pub use evaluation::evaluator::{CompatibilityEvaluator, EvaluationError, EvaluatorConfig};
