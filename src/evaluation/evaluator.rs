use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

use crate::annealing::matrix::{AnnealingMatrix, MatrixError};
use crate::annealing::registry::EnzymeRegistry;
use crate::annealing::store::AnnealingMatrixProvider;
use crate::core::overhang::OverhangRecord;
use crate::core::sequence::{self, SequenceError};
use crate::core::types::{AnnealingCondition, DatasetId, Enzyme, OverhangPair};
use crate::evaluation::diagnostics::{
    set_size_limit, CrossMisanneal, OverhangSetDiagnostics, SimilarPair,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("No annealing data for enzyme {enzyme}: {reason}")]
    UnknownEnzyme { enzyme: String, reason: String },

    #[error("No overhangs to evaluate")]
    EmptyInput,

    #[error("Overhang {sequence} has length {found}, expected {expected} (all overhangs must have the same length)")]
    InconsistentLength {
        expected: usize,
        found: usize,
        sequence: String,
    },

    #[error(transparent)]
    InvalidSequence(#[from] SequenceError),

    #[error("Sequence {sequence} is not present in annealing dataset {dataset}")]
    MissingFromMatrix { sequence: String, dataset: DatasetId },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Minimum Watson-Crick ligation count for a reliable pairing (Pryor et al., Figure 2)
pub const DEFAULT_STRENGTH_THRESHOLD: u32 = 400;

/// Cross-ligation counts above this are treated as misannealing rather than noise
pub const DEFAULT_NOISE_THRESHOLD: u32 = 10;

/// Thresholds and ligation condition used by the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Weak anneal when the correct pairing count is below this
    pub strength_threshold: u32,
    /// Cross-misanneal when any cross count exceeds this
    pub noise_threshold: u32,
    /// Report overhang pairs differing in fewer positions than this (0 disables)
    pub difference_threshold: usize,
    pub condition: AnnealingCondition,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            strength_threshold: DEFAULT_STRENGTH_THRESHOLD,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            difference_threshold: 0,
            condition: AnnealingCondition::default(),
        }
    }
}

/// Validate raw overhangs and build their records, preserving order and repeats.
///
/// # Errors
///
/// Returns `EvaluationError::EmptyInput` for an empty list,
/// `EvaluationError::InvalidSequence` for empty or non-DNA strings, or
/// `EvaluationError::InconsistentLength` if lengths differ.
pub fn build_records<S: AsRef<str>>(raw: &[S]) -> Result<Vec<OverhangRecord>, EvaluationError> {
    if raw.is_empty() {
        return Err(EvaluationError::EmptyInput);
    }

    let records = raw
        .iter()
        .map(|seq| OverhangRecord::new(seq.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let expected = records[0].len();
    if let Some(odd) = records.iter().find(|r| r.len() != expected) {
        return Err(EvaluationError::InconsistentLength {
            expected,
            found: odd.len(),
            sequence: odd.input().to_string(),
        });
    }
    Ok(records)
}

/// Records with repeated inputs removed, keeping first occurrences in order
#[must_use]
pub fn unique_records(records: &[OverhangRecord]) -> Vec<&OverhangRecord> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.input()))
        .collect()
}

/// Checks an overhang set for structural and annealing defects
pub struct CompatibilityEvaluator<'a> {
    provider: &'a dyn AnnealingMatrixProvider,
    registry: EnzymeRegistry,
    config: EvaluatorConfig,
}

impl<'a> CompatibilityEvaluator<'a> {
    pub fn new(
        provider: &'a dyn AnnealingMatrixProvider,
        registry: EnzymeRegistry,
        config: EvaluatorConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &EnzymeRegistry {
        &self.registry
    }

    /// Evaluate a list of raw overhang strings
    ///
    /// # Errors
    ///
    /// See [`build_records`] and [`CompatibilityEvaluator::evaluate_records`].
    pub fn evaluate<S: AsRef<str>>(
        &self,
        raw: &[S],
        enzyme: Enzyme,
    ) -> Result<OverhangSetDiagnostics, EvaluationError> {
        let records = build_records(raw)?;
        self.evaluate_records(&records, enzyme)
    }

    /// Resolve the annealing matrix for an enzyme under the configured condition
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::UnknownEnzyme` if the enzyme has no dataset
    /// in the registry or the provider has no matrix for that dataset.
    pub fn matrix_for(
        &self,
        enzyme: Enzyme,
    ) -> Result<(&DatasetId, &'a AnnealingMatrix), EvaluationError> {
        let dataset =
            self.registry
                .dataset_for(enzyme)
                .ok_or_else(|| EvaluationError::UnknownEnzyme {
                    enzyme: enzyme.to_string(),
                    reason: "enzyme has no dataset in the registry".to_string(),
                })?;
        let matrix = self
            .provider
            .lookup(dataset, &self.config.condition)
            .ok_or_else(|| EvaluationError::UnknownEnzyme {
                enzyme: enzyme.to_string(),
                reason: format!(
                    "dataset {dataset} is not loaded for {}",
                    self.config.condition
                ),
            })?;
        Ok((dataset, matrix))
    }

    /// Evaluate records built with [`build_records`]
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::EmptyInput` for no records,
    /// `EvaluationError::InconsistentLength` for mixed lengths,
    /// `EvaluationError::UnknownEnzyme` if no annealing matrix is available, or
    /// `EvaluationError::MissingFromMatrix` if the matrix lacks an overhang.
    pub fn evaluate_records(
        &self,
        records: &[OverhangRecord],
        enzyme: Enzyme,
    ) -> Result<OverhangSetDiagnostics, EvaluationError> {
        let first = records.first().ok_or(EvaluationError::EmptyInput)?;
        let overhang_length = first.len();
        if let Some(odd) = records.iter().find(|r| r.len() != overhang_length) {
            return Err(EvaluationError::InconsistentLength {
                expected: overhang_length,
                found: odd.len(),
                sequence: odd.input().to_string(),
            });
        }

        // Structural checks
        let duplicate_overhangs = find_duplicates(records);
        let palindromic: BTreeSet<String> = records
            .iter()
            .filter(|r| r.is_palindromic())
            .map(|r| r.canonical().to_string())
            .collect();
        let reverse_complement_collisions = find_reverse_complement_collisions(records);
        debug!(
            "{} overhang(s): {} duplicated, {} palindromic, {} reverse complement collisions",
            records.len(),
            duplicate_overhangs.len(),
            palindromic.len(),
            reverse_complement_collisions.len()
        );

        // Annealing checks run once per distinct overhang
        let (dataset, full_matrix) = self.matrix_for(enzyme)?;
        let unique = unique_records(records);
        let matrix = full_matrix
            .restrict_to(
                unique
                    .iter()
                    .flat_map(|r| [r.canonical(), r.complement()]),
            )
            .map_err(|e| match e {
                MatrixError::MissingLabel(sequence) => EvaluationError::MissingFromMatrix {
                    sequence,
                    dataset: dataset.clone(),
                },
                other => EvaluationError::Matrix(other),
            })?;

        let weak_anneals = self.find_weak_anneals(&matrix, &unique);
        let self_misanneals = find_self_misanneals(&matrix, &unique);
        let cross_misanneals = self.find_cross_misanneals(&matrix, &unique);
        let similar_overhangs = self.find_similar_overhangs(&unique);
        debug!(
            "{} ({}): {} weak, {} self-misannealing, {} misannealing pairs",
            enzyme,
            dataset,
            weak_anneals.len(),
            self_misanneals.len(),
            cross_misanneals.len()
        );

        let size_limit = set_size_limit(overhang_length);
        let oversized_set = size_limit.is_some_and(|limit| records.len() > limit);

        let duplicates = !duplicate_overhangs.is_empty();
        let has_errors =
            duplicates || !palindromic.is_empty() || !reverse_complement_collisions.is_empty();
        let has_warnings = oversized_set
            || !weak_anneals.is_empty()
            || !self_misanneals.is_empty()
            || !cross_misanneals.is_empty();

        Ok(OverhangSetDiagnostics {
            enzyme,
            dataset: dataset.clone(),
            condition: self.config.condition,
            overhang_count: records.len(),
            overhang_length,
            duplicates,
            duplicate_overhangs,
            palindromic,
            reverse_complement_collisions,
            weak_anneals,
            self_misanneals,
            cross_misanneals,
            similar_overhangs,
            oversized_set,
            size_limit,
            has_errors,
            has_warnings,
        })
    }

    fn find_weak_anneals(
        &self,
        matrix: &AnnealingMatrix,
        records: &[&OverhangRecord],
    ) -> Vec<OverhangPair> {
        records
            .iter()
            .filter(|r| cell(matrix, r.canonical(), r.complement()) < self.config.strength_threshold)
            .map(|r| r.pair())
            .collect()
    }

    fn find_cross_misanneals(
        &self,
        matrix: &AnnealingMatrix,
        records: &[&OverhangRecord],
    ) -> Vec<CrossMisanneal> {
        let mut misanneals = Vec::new();
        for (i, a) in records.iter().enumerate() {
            for b in &records[i + 1..] {
                let max_count = [
                    cell(matrix, a.canonical(), b.canonical()),
                    cell(matrix, a.canonical(), b.complement()),
                    cell(matrix, a.complement(), b.canonical()),
                    cell(matrix, a.complement(), b.complement()),
                ]
                .into_iter()
                .max()
                .unwrap_or(0);

                if max_count > self.config.noise_threshold {
                    misanneals.push(CrossMisanneal {
                        first: a.pair(),
                        second: b.pair(),
                        max_count,
                    });
                }
            }
        }
        misanneals
    }

    fn find_similar_overhangs(&self, records: &[&OverhangRecord]) -> Vec<SimilarPair> {
        let mut similar = Vec::new();
        for (i, a) in records.iter().enumerate() {
            for b in &records[i + 1..] {
                let distance = a.hamming_distance(b);
                if distance < self.config.difference_threshold {
                    similar.push(SimilarPair {
                        first: a.pair(),
                        second: b.pair(),
                        distance,
                    });
                }
            }
        }
        similar
    }
}

/// Strands that ligate to a copy of themselves
fn find_self_misanneals(matrix: &AnnealingMatrix, records: &[&OverhangRecord]) -> Vec<OverhangPair> {
    records
        .iter()
        .filter(|r| {
            cell(matrix, r.canonical(), r.canonical()) != 0
                || cell(matrix, r.complement(), r.complement()) != 0
        })
        .map(|r| r.pair())
        .collect()
}

fn find_duplicates(records: &[OverhangRecord]) -> BTreeSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.input()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(seq, _)| seq.to_string())
        .collect()
}

/// Distinct, nonpalindromic inputs whose reverse complement is also an input
fn find_reverse_complement_collisions(records: &[OverhangRecord]) -> BTreeSet<String> {
    let nonpalindromic: BTreeSet<&str> = records
        .iter()
        .filter(|r| !r.is_palindromic())
        .map(OverhangRecord::input)
        .collect();
    nonpalindromic
        .iter()
        .filter(|seq| {
            sequence::reverse_complement(seq)
                .map(|rc| nonpalindromic.contains(rc.as_str()))
                .unwrap_or(false)
        })
        .map(|seq| (*seq).to_string())
        .collect()
}

/// Restricted matrices always contain every evaluated sequence
fn cell(matrix: &AnnealingMatrix, a: &str, b: &str) -> u32 {
    matrix.get(a, b).unwrap_or(0)
}
