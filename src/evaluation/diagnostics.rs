use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::types::{AnnealingCondition, DatasetId, Enzyme, OverhangPair};

/// Fidelity ceiling on set size for an overhang length (Pryor et al., PLoS ONE 2020)
#[must_use]
pub fn set_size_limit(overhang_length: usize) -> Option<usize> {
    match overhang_length {
        3 => Some(10),
        4 => Some(20),
        _ => None,
    }
}

/// Two distinct overhang pairs that ligate to each other above the noise threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossMisanneal {
    pub first: OverhangPair,
    pub second: OverhangPair,
    /// Largest of the four cross counts between the two pairs
    pub max_count: u32,
}

impl CrossMisanneal {
    /// True if this misanneal links the two given pairs, in either order
    #[must_use]
    pub fn links(&self, a: &OverhangPair, b: &OverhangPair) -> bool {
        (&self.first == a && &self.second == b) || (&self.first == b && &self.second == a)
    }
}

impl std::fmt::Display for CrossMisanneal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.first, self.second)
    }
}

/// Two overhangs that differ in fewer positions than the configured threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarPair {
    pub first: OverhangPair,
    pub second: OverhangPair,
    pub distance: usize,
}

/// Structural and annealing defects of an overhang set.
///
/// Structural defects (duplicates, palindromes, reverse-complement
/// collisions) make a set unusable and set `has_errors`. Annealing defects and
/// oversized sets lower assembly fidelity and set `has_warnings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverhangSetDiagnostics {
    pub enzyme: Enzyme,
    pub dataset: DatasetId,
    pub condition: AnnealingCondition,

    /// Number of overhangs in the input, repeats included
    pub overhang_count: usize,
    pub overhang_length: usize,

    pub duplicates: bool,
    pub duplicate_overhangs: BTreeSet<String>,
    pub palindromic: BTreeSet<String>,
    /// Inputs whose reverse complement is also an input
    pub reverse_complement_collisions: BTreeSet<String>,

    pub weak_anneals: Vec<OverhangPair>,
    pub self_misanneals: Vec<OverhangPair>,
    pub cross_misanneals: Vec<CrossMisanneal>,
    pub similar_overhangs: Vec<SimilarPair>,

    pub oversized_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<usize>,

    pub has_errors: bool,
    pub has_warnings: bool,
}

impl OverhangSetDiagnostics {
    /// Human-readable descriptions of the errors found
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if self.duplicates {
            messages.push(format!(
                "Duplicate overhang(s): {}",
                join(&self.duplicate_overhangs)
            ));
        }
        if !self.palindromic.is_empty() {
            messages.push(format!(
                "Palindromic overhang(s): {}",
                join(&self.palindromic)
            ));
        }
        if !self.reverse_complement_collisions.is_empty() {
            messages.push(format!(
                "Nonpalindromic overhang(s) with reverse complement in set: {}",
                join(&self.reverse_complement_collisions)
            ));
        }
        messages
    }

    /// Human-readable descriptions of the warnings found
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if let (true, Some(limit)) = (self.oversized_set, self.size_limit) {
            messages.push(format!(
                "Assembly fidelity significantly decreases when using more than {limit} overhangs ({} given)",
                self.overhang_count
            ));
        }
        if !self.weak_anneals.is_empty() {
            messages.push(format!(
                "Weak annealing: {}",
                join(&self.weak_anneals)
            ));
        }
        if !self.self_misanneals.is_empty() {
            messages.push(format!(
                "Self-misannealing: {}",
                join(&self.self_misanneals)
            ));
        }
        if !self.cross_misanneals.is_empty() {
            messages.push(format!(
                "Misannealing pairs: {}",
                join(&self.cross_misanneals)
            ));
        }
        messages
    }

    /// Every pair implicated in a weak anneal or self-misanneal
    #[must_use]
    pub fn unreliable_pairs(&self) -> BTreeSet<&OverhangPair> {
        self.weak_anneals
            .iter()
            .chain(&self.self_misanneals)
            .collect()
    }

    /// True if the two pairs are named together in a cross-misanneal
    #[must_use]
    pub fn cross_misanneal_between(&self, a: &OverhangPair, b: &OverhangPair) -> bool {
        self.cross_misanneals.iter().any(|m| m.links(a, b))
    }
}

fn join<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
