//! Overhang-set evaluation and compatible-subset search.
//!
//! - [`CompatibilityEvaluator`]: checks a set of overhangs against an annealing matrix
//! - [`OverhangSetDiagnostics`]: everything the evaluator found
//! - [`find_compatible_subset`]: largest group of overhangs free of misannealing
//!
//! ## Checks
//!
//! Structural defects make a set unusable regardless of the enzyme:
//!
//! 1. **Duplicates**: the same overhang listed twice
//! 2. **Palindromes**: overhangs equal to their own reverse complement
//! 3. **Reverse-complement collisions**: two inputs that are each other's reverse complement
//!
//! Annealing defects are read from the enzyme's ligation-count matrix:
//!
//! - **Weak anneal**: the Watson-Crick count is below the strength threshold
//! - **Self-misanneal**: a strand ligates to a copy of itself
//! - **Cross-misanneal**: two different pairs ligate above the noise threshold
//!
//! Sets larger than 10 (3-nt) or 20 (4-nt) overhangs are flagged as oversized.
//!
//! ## Example
//!
//! ```rust,no_run
//! use overhang::annealing::registry::EnzymeRegistry;
//! use overhang::annealing::store::AnnealingDataStore;
//! use overhang::evaluation::{build_records, find_compatible_subset};
//! use overhang::evaluation::{CompatibilityEvaluator, EvaluatorConfig};
//! use overhang::Enzyme;
//! use std::path::Path;
//!
//! let store = AnnealingDataStore::load_from_dir(Path::new("data")).unwrap();
//! let evaluator =
//!     CompatibilityEvaluator::new(&store, EnzymeRegistry::default(), EvaluatorConfig::default());
//!
//! let records = build_records(&["CTAT", "GGAC", "TGTT"]).unwrap();
//! let diagnostics = evaluator.evaluate_records(&records, Enzyme::Esp3I).unwrap();
//! for warning in diagnostics.warning_messages() {
//!     println!("{warning}");
//! }
//! println!("{:?}", find_compatible_subset(&diagnostics, &records));
//! ```

pub mod clique;
pub mod diagnostics;
pub mod evaluator;

pub use clique::{find_compatible_subset, CompatibilityGraph};
pub use diagnostics::OverhangSetDiagnostics;
pub use evaluator::{build_records, CompatibilityEvaluator, EvaluationError, EvaluatorConfig};
